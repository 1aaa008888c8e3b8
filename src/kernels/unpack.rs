//! Bit-unpacking kernels for the groups of eight values that make up a
//! bit-packed run.
//!
//! A group of eight `W`-bit values is stored edge to edge, least significant
//! bit first, so it always occupies exactly `W` whole bytes. There is one
//! monomorphized function per width in [1, 32]; the hybrid decoder picks its
//! function once, at construction.

use crate::error::DecodeError;

/// Unpacks one group: exactly `width` bytes in, eight integers out.
pub type Unpack8Fn = fn(&[u8]) -> [i32; 8];

pub const MAX_BIT_WIDTH: u32 = 32;

/// Decodes eight `W`-bit integers from `packed`.
///
/// Values of width 32 are reinterpreted bit for bit as `i32`.
#[inline]
fn unpack8<const W: usize>(packed: &[u8]) -> [i32; 8] {
    debug_assert_eq!(packed.len(), W);
    let mask: u64 = (1u64 << W) - 1;
    let mut out = [0i32; 8];

    for (i, slot) in out.iter_mut().enumerate() {
        let first_bit = i * W;
        let first_byte = first_bit / 8;
        let shift = first_bit % 8;

        // A value spans at most 5 bytes (31 bits of offset + 32 bits of width fit in 40).
        let mut window = 0u64;
        for (k, &byte) in packed.iter().skip(first_byte).take(5).enumerate() {
            window |= (byte as u64) << (8 * k);
        }
        *slot = ((window >> shift) & mask) as u32 as i32;
    }
    out
}

macro_rules! unpack_table {
    ($($w:literal),+ $(,)?) => {
        [$(unpack8::<$w> as Unpack8Fn),+]
    };
}

/// Indexed by `width - 1`.
static UNPACK8_TABLE: [Unpack8Fn; MAX_BIT_WIDTH as usize] = unpack_table!(
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31, 32,
);

/// Returns the unpack function for `width`, or `InvalidConfiguration` if the
/// width is outside [1, 32].
pub fn unpack8_fn_for_width(width: u32) -> Result<Unpack8Fn, DecodeError> {
    if width == 0 || width > MAX_BIT_WIDTH {
        return Err(DecodeError::InvalidConfiguration(format!(
            "bit width must be in [1, {}], got {}",
            MAX_BIT_WIDTH, width
        )));
    }
    Ok(UNPACK8_TABLE[(width - 1) as usize])
}
