//! This module is the public face of the page value decoders.
//!
//! It declares the decoder families and the `PlainDecoder` trait every PLAIN
//! decoder implements. All decoders are pull-based: the caller owns the output
//! storage and asks for as many values as fit in it.

use crate::error::{DecodeResult, PartialDecode};
use crate::types::Value;

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod dynamic;
pub mod hybrid;
pub mod plain;


pub use dynamic::{AnyPlainDecoder, ValuesMut};
pub use hybrid::{bit_width_for_max_level, HybridDecoder};
pub use plain::{
    BooleanPlainDecoder, ByteArrayPlainDecoder, DoublePlainDecoder, FixedLenByteArrayPlainDecoder,
    FixedWidthDecoder, FloatPlainDecoder, Int32PlainDecoder, Int64PlainDecoder, Int96PlainDecoder,
};

//==================================================================================
// 2. The Plain Decoder Contract
//==================================================================================

/// A PLAIN decoder bound to one page buffer.
pub trait PlainDecoder<'a> {
    type Item: Copy + Default + Into<Value<'a>>;

    /// Binds a new buffer and rewinds the cursor.
    fn init(&mut self, data: &'a [u8]);

    /// Decodes up to `out.len()` values into the front of `out`.
    ///
    /// Returns the number written. On failure the error carries the number of
    /// values written before it; those slots are valid, the rest are untouched.
    fn decode(&mut self, out: &mut [Self::Item]) -> DecodeResult;

    /// Same as [`decode`](Self::decode) for callers holding a dynamically-typed
    /// output. Decodes into a typed scratch buffer of `out.len()` values and
    /// copies the decoded prefix across.
    fn decode_dynamic(&mut self, out: &mut [Value<'a>]) -> DecodeResult {
        let mut scratch = vec![Self::Item::default(); out.len()];
        let result = self.decode(&mut scratch);
        let decoded = match &result {
            Ok(n) => *n,
            Err(PartialDecode { values_decoded, .. }) => *values_decoded,
        };
        for (dst, src) in out.iter_mut().zip(&scratch[..decoded]) {
            *dst = (*src).into();
        }
        result
    }
}
