//! This module contains the pure, stateless kernels for reading and writing
//! unsigned LEB128 varints (base-128, little-endian groups of 7 bits).
//!
//! Hybrid streams prefix every run with one of these. Reading never touches a
//! caller cursor: the kernel reports how many bytes it consumed and the caller
//! advances only on success.

use num_traits::{PrimInt, Unsigned};

use crate::error::DecodeError;

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Encodes a single unsigned integer into a LEB128 byte sequence, writing to a buffer.
pub fn encode_one<T>(value: T, buffer: &mut Vec<u8>) -> Result<(), DecodeError>
where
    T: PrimInt + Unsigned,
{
    let zero = T::zero();
    let seven_bit_mask = T::from(0x7F).ok_or_else(|| {
        DecodeError::InvalidConfiguration("Failed to create 7-bit mask for type".to_string())
    })?;

    let mut current_value = value;
    loop {
        let low = (current_value & seven_bit_mask).to_u8().ok_or_else(|| {
            DecodeError::InvalidConfiguration("Failed to convert generic integer to u8".to_string())
        })?;
        current_value = current_value >> 7;

        if current_value == zero {
            buffer.push(low);
            return Ok(());
        }
        buffer.push(low | 0x80);
    }
}

/// Decodes a single unsigned integer from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Fails with
/// `MalformedVarint` if the input ends before the last group or the value
/// does not fit in `T`.
pub fn decode_one<T>(bytes: &[u8]) -> Result<(T, usize), DecodeError>
where
    T: PrimInt + Unsigned,
{
    let mut result = T::zero();
    let mut shift = 0usize;
    let total_bits = std::mem::size_of::<T>() * 8;

    for (i, &byte) in bytes.iter().enumerate() {
        let payload = byte & 0x7F;

        // Any payload bit landing at or beyond `total_bits` overflows `T`.
        if shift >= total_bits {
            if payload != 0 || byte & 0x80 != 0 {
                return Err(DecodeError::MalformedVarint(format!(
                    "value exceeds {} bits",
                    total_bits
                )));
            }
        } else if shift + 7 > total_bits && (payload >> (total_bits - shift)) != 0 {
            return Err(DecodeError::MalformedVarint(format!(
                "value exceeds {} bits",
                total_bits
            )));
        }

        if shift < total_bits {
            let seven_bits = T::from(payload).ok_or_else(|| {
                DecodeError::MalformedVarint("Failed to create 7-bit payload from byte".to_string())
            })?;
            result = result | (seven_bits << shift);
        }

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    Err(DecodeError::MalformedVarint(format!(
        "truncated after {} bytes",
        bytes.len()
    )))
}
