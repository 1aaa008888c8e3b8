//! This module defines shared traits used across the plain decoders.

use crate::types::Int96;

/// A primitive stored PLAIN as exactly `WIDTH` little-endian bytes.
pub trait PlainType: Copy + Default + std::fmt::Debug + 'static {
    const WIDTH: usize;
    /// Prefix used in error messages, e.g. `"float/plain"`.
    const CONTEXT: &'static str;

    /// Reads one value. `bytes` is exactly `WIDTH` long.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

/// Copies a slice the caller has already sized into a fixed array.
#[inline]
fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(bytes);
    buf
}

// Integers read straight from their little-endian bytes.
macro_rules! impl_plain_int {
    ($T:ty, $context:literal) => {
        impl PlainType for $T {
            const WIDTH: usize = std::mem::size_of::<$T>();
            const CONTEXT: &'static str = $context;

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                <$T>::from_le_bytes(le_array(bytes))
            }
        }
    };
}

// Floats rebuilt from their IEEE-754 bit pattern so NaN payloads survive.
macro_rules! impl_plain_float {
    ($T:ty, $Bits:ty, $context:literal) => {
        impl PlainType for $T {
            const WIDTH: usize = std::mem::size_of::<$T>();
            const CONTEXT: &'static str = $context;

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                <$T>::from_bits(<$Bits>::from_le_bytes(le_array(bytes)))
            }
        }
    };
}

impl_plain_int!(i32, "int32/plain");
impl_plain_int!(i64, "int64/plain");
impl_plain_float!(f32, u32, "float/plain");
impl_plain_float!(f64, u64, "double/plain");

impl PlainType for Int96 {
    const WIDTH: usize = Int96::WIDTH;
    const CONTEXT: &'static str = "int96/plain";

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        Int96::from_le_bytes(le_array(bytes))
    }
}
