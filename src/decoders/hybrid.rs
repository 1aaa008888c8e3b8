//! Decoder for the RLE/bit-packing hybrid encoding, used for repetition and
//! definition levels and for dictionary indices.
//!
//! ```text
//! encoded-data      := <run>*
//! run               := <bit-packed-run> | <rle-run>
//! bit-packed-run    := varint(<groups of 8> << 1 | 1) <groups * bit-width bytes>
//! rle-run           := varint(<repeat count> << 1) <value in ceil(bit-width / 8) bytes>
//! ```
//!
//! Bit-packed runs always hold a multiple of eight values, which is why their
//! header counts groups rather than values.

use crate::error::{DecodeError, DecodeResult, PartialDecode, RunKind};
use crate::kernels::unpack::{unpack8_fn_for_width, Unpack8Fn};
use crate::kernels::varint;

const CONTEXT: &str = "rle";

/// The run currently being drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    /// The next value needs a new run header.
    Idle,
    Rle {
        remaining: u32,
        value: i32,
    },
    /// `position == 0` means the next value needs a fresh group.
    BitPacked {
        remaining_groups: u32,
        position: u8,
        group: [i32; 8],
    },
}

/// Number of bits needed to store every value in `0..=max_level`.
pub fn bit_width_for_max_level(max_level: u32) -> u32 {
    u32::BITS - max_level.leading_zeros()
}

/// Pull decoder over one hybrid-encoded stream.
#[derive(Debug, Clone)]
pub struct HybridDecoder<'a> {
    bit_width: u32,
    byte_width: usize,
    unpack: Unpack8Fn,

    data: &'a [u8],
    pos: usize,
    count: usize,
    produced: usize,
    run: Run,
}

impl<'a> HybridDecoder<'a> {
    /// Creates an unbound decoder for `bit_width`-bit values.
    ///
    /// Fails with `InvalidConfiguration` unless `bit_width` is in [1, 32].
    pub fn new(bit_width: u32) -> Result<Self, DecodeError> {
        let unpack = unpack8_fn_for_width(bit_width)?;
        Ok(Self {
            bit_width,
            byte_width: bit_width.div_ceil(8) as usize,
            unpack,
            data: &[],
            pos: 0,
            count: 0,
            produced: 0,
            run: Run::Idle,
        })
    }

    /// Creates a decoder already bound to `data`, producing at most `count` values.
    pub fn with_data(bit_width: u32, data: &'a [u8], count: usize) -> Result<Self, DecodeError> {
        let mut decoder = Self::new(bit_width)?;
        decoder.init(data, count);
        Ok(decoder)
    }

    /// Binds a stream that starts with a 4-byte little-endian byte length, as
    /// levels are stored in v1 data pages.
    ///
    /// Returns the decoder, bound to exactly that many bytes, and the rest of
    /// the page that follows them.
    pub fn for_length_prefixed(
        data: &'a [u8],
        bit_width: u32,
        count: usize,
    ) -> Result<(Self, &'a [u8]), DecodeError> {
        let mut decoder = Self::new(bit_width)?;
        let prefix = data.get(..4).ok_or(DecodeError::NotEnoughData {
            context: "rle/length",
            needed: 4,
            available: data.len(),
        })?;
        let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        let body = data[4..].get(..len).ok_or(DecodeError::NotEnoughData {
            context: "rle/length",
            needed: 4 + len,
            available: data.len(),
        })?;
        decoder.init(body, count);
        Ok((decoder, &data[4 + len..]))
    }

    /// Binds a dictionary-index stream: one byte of bit width, then the runs.
    pub fn for_dictionary_indices(data: &'a [u8], count: usize) -> Result<Self, DecodeError> {
        let (&width, runs) = data
            .split_first()
            .ok_or(DecodeError::NoMoreData("rle/dictionary"))?;
        Self::with_data(width as u32, runs, count)
    }

    /// Binds a new stream, rewinds the cursor and drops any half-drained run.
    pub fn init(&mut self, data: &'a [u8], count: usize) {
        self.data = data;
        self.pos = 0;
        self.count = count;
        self.produced = 0;
        self.run = Run::Idle;
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Values still allowed before the count given to `init` is reached.
    pub fn remaining(&self) -> usize {
        self.count - self.produced
    }

    pub fn values_produced(&self) -> usize {
        self.produced
    }

    /// Bytes of the stream consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Decodes `min(levels.len(), remaining())` values into the front of `levels`.
    pub fn decode(&mut self, levels: &mut [i32]) -> DecodeResult {
        let n = levels.len().min(self.remaining());
        for (i, slot) in levels[..n].iter_mut().enumerate() {
            *slot = self.next_value().map_err(|e| PartialDecode::new(i, e))?;
            self.produced += 1;
        }
        Ok(n)
    }

    fn next_value(&mut self) -> Result<i32, DecodeError> {
        if self.run == Run::Idle {
            self.run = self.read_run_header()?;
        }

        match &mut self.run {
            Run::Rle { remaining, value } => {
                let value = *value;
                *remaining -= 1;
                if *remaining == 0 {
                    self.run = Run::Idle;
                }
                Ok(value)
            }
            Run::BitPacked {
                remaining_groups,
                position,
                group,
            } => {
                if *position == 0 {
                    let packed = take(self.data, &mut self.pos, self.bit_width as usize, "rle/bit-packed")?;
                    *group = (self.unpack)(packed);
                    *remaining_groups -= 1;
                }
                let value = group[*position as usize];
                *position = (*position + 1) % 8;
                if *position == 0 && *remaining_groups == 0 {
                    self.run = Run::Idle;
                }
                Ok(value)
            }
            Run::Idle => unreachable!("a run header was just read"),
        }
    }

    fn read_run_header(&mut self) -> Result<Run, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::NoMoreData(CONTEXT));
        }

        let (header, n) = varint::decode_one::<u64>(&self.data[self.pos..])?;
        let header = u32::try_from(header).map_err(|_| {
            DecodeError::MalformedVarint(format!("run header {} exceeds u32", header))
        })?;
        self.pos += n;

        let multiplicity = header >> 1;
        if header & 1 == 1 {
            log::trace!("rle: bit-packed run of {} groups at byte {}", multiplicity, self.pos);
            if multiplicity == 0 {
                return Err(DecodeError::EmptyRun(RunKind::BitPacked));
            }
            Ok(Run::BitPacked {
                remaining_groups: multiplicity,
                position: 0,
                group: [0; 8],
            })
        } else {
            log::trace!("rle: RLE run of {} values at byte {}", multiplicity, self.pos);
            if multiplicity == 0 {
                return Err(DecodeError::EmptyRun(RunKind::Rle));
            }
            let bytes = take(self.data, &mut self.pos, self.byte_width, "rle/value")?;
            Ok(Run::Rle {
                remaining: multiplicity,
                value: read_le_i32(bytes),
            })
        }
    }
}

/// Returns the next `n` bytes and advances `pos`, or `NotEnoughData` without advancing.
#[inline]
fn take<'a>(
    data: &'a [u8],
    pos: &mut usize,
    n: usize,
    context: &'static str,
) -> Result<&'a [u8], DecodeError> {
    let rest = &data[*pos..];
    let bytes = rest.get(..n).ok_or(DecodeError::NotEnoughData {
        context,
        needed: n,
        available: rest.len(),
    })?;
    *pos += n;
    Ok(bytes)
}

/// Little-endian value of up to 4 bytes, reinterpreted as `i32` without sign extension.
#[inline]
fn read_le_i32(bytes: &[u8]) -> i32 {
    bytes
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (b as u32) << (8 * i)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_width_for_max_level() {
        assert_eq!(bit_width_for_max_level(0), 0);
        assert_eq!(bit_width_for_max_level(1), 1);
        assert_eq!(bit_width_for_max_level(2), 2);
        assert_eq!(bit_width_for_max_level(7), 3);
        assert_eq!(bit_width_for_max_level(8), 4);
        assert_eq!(bit_width_for_max_level(u32::MAX), 32);
    }

    #[test]
    fn test_read_le_i32() {
        assert_eq!(read_le_i32(&[0x01]), 1);
        assert_eq!(read_le_i32(&[0x34, 0x12]), 0x1234);
        assert_eq!(read_le_i32(&[0xFF, 0xFF]), 0xFFFF);
        assert_eq!(read_le_i32(&[0xFF, 0xFF, 0xFF, 0xFF]), -1);
    }

    #[test]
    fn test_construction_rejects_bad_widths() {
        for width in [0, 33, 64] {
            assert!(matches!(
                HybridDecoder::new(width),
                Err(DecodeError::InvalidConfiguration(_))
            ));
        }
        let decoder = HybridDecoder::new(9).unwrap();
        assert_eq!(decoder.byte_width, 2);
        assert_eq!(decoder.bit_width(), 9);
    }
}
