//! Type-erased PLAIN decoding for callers that only learn the physical type at
//! runtime (from the column descriptor).
//!
//! `AnyPlainDecoder` is a closed enum over the typed decoders and `ValuesMut`
//! is the matching closed set of output slices. Handing a decoder the wrong
//! kind of output is a configuration error, never a data error.

use super::plain::{
    BooleanPlainDecoder, ByteArrayPlainDecoder, DoublePlainDecoder, FixedLenByteArrayPlainDecoder,
    FloatPlainDecoder, Int32PlainDecoder, Int64PlainDecoder, Int96PlainDecoder,
};
use super::PlainDecoder;
use crate::error::{DecodeError, DecodeResult, PartialDecode};
use crate::types::{Int96, PhysicalType, Value};

/// A caller-owned output slice tagged with the type it holds.
#[derive(Debug)]
pub enum ValuesMut<'o, 'a> {
    Boolean(&'o mut [bool]),
    Int32(&'o mut [i32]),
    Int64(&'o mut [i64]),
    Int96(&'o mut [Int96]),
    Float(&'o mut [f32]),
    Double(&'o mut [f64]),
    /// Output for both `ByteArray` and `FixedLenByteArray` columns.
    Bytes(&'o mut [&'a [u8]]),
}

impl ValuesMut<'_, '_> {
    pub fn len(&self) -> usize {
        match self {
            ValuesMut::Boolean(v) => v.len(),
            ValuesMut::Int32(v) => v.len(),
            ValuesMut::Int64(v) => v.len(),
            ValuesMut::Int96(v) => v.len(),
            ValuesMut::Float(v) => v.len(),
            ValuesMut::Double(v) => v.len(),
            ValuesMut::Bytes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            ValuesMut::Boolean(_) => "Boolean",
            ValuesMut::Int32(_) => "Int32",
            ValuesMut::Int64(_) => "Int64",
            ValuesMut::Int96(_) => "Int96",
            ValuesMut::Float(_) => "Float",
            ValuesMut::Double(_) => "Double",
            ValuesMut::Bytes(_) => "Bytes",
        }
    }
}

/// A PLAIN decoder for any physical type.
#[derive(Debug, Clone)]
pub enum AnyPlainDecoder<'a> {
    Boolean(BooleanPlainDecoder<'a>),
    Int32(Int32PlainDecoder<'a>),
    Int64(Int64PlainDecoder<'a>),
    Int96(Int96PlainDecoder<'a>),
    Float(FloatPlainDecoder<'a>),
    Double(DoublePlainDecoder<'a>),
    ByteArray(ByteArrayPlainDecoder<'a>),
    FixedLenByteArray(FixedLenByteArrayPlainDecoder<'a>),
}

// Runs `$body` with `$d` bound to whichever typed decoder is inside.
macro_rules! with_decoder {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            AnyPlainDecoder::Boolean($d) => $body,
            AnyPlainDecoder::Int32($d) => $body,
            AnyPlainDecoder::Int64($d) => $body,
            AnyPlainDecoder::Int96($d) => $body,
            AnyPlainDecoder::Float($d) => $body,
            AnyPlainDecoder::Double($d) => $body,
            AnyPlainDecoder::ByteArray($d) => $body,
            AnyPlainDecoder::FixedLenByteArray($d) => $body,
        }
    };
}

impl<'a> AnyPlainDecoder<'a> {
    /// Creates an unbound decoder for `physical_type`.
    ///
    /// `type_length` is required for `FixedLenByteArray` and ignored otherwise.
    pub fn new(physical_type: PhysicalType, type_length: Option<usize>) -> Result<Self, DecodeError> {
        log::debug!(
            "creating {} plain decoder (type_length={:?})",
            physical_type,
            type_length
        );
        let decoder = match physical_type {
            PhysicalType::Boolean => Self::Boolean(BooleanPlainDecoder::default()),
            PhysicalType::Int32 => Self::Int32(Int32PlainDecoder::default()),
            PhysicalType::Int64 => Self::Int64(Int64PlainDecoder::default()),
            PhysicalType::Int96 => Self::Int96(Int96PlainDecoder::default()),
            PhysicalType::Float => Self::Float(FloatPlainDecoder::default()),
            PhysicalType::Double => Self::Double(DoublePlainDecoder::default()),
            PhysicalType::ByteArray => Self::ByteArray(ByteArrayPlainDecoder::default()),
            PhysicalType::FixedLenByteArray => {
                let length = type_length.ok_or_else(|| {
                    DecodeError::InvalidConfiguration(
                        "FIXED_LEN_BYTE_ARRAY column without a type length".to_string(),
                    )
                })?;
                Self::FixedLenByteArray(FixedLenByteArrayPlainDecoder::new(length)?)
            }
        };
        Ok(decoder)
    }

    pub fn physical_type(&self) -> PhysicalType {
        match self {
            Self::Boolean(_) => PhysicalType::Boolean,
            Self::Int32(_) => PhysicalType::Int32,
            Self::Int64(_) => PhysicalType::Int64,
            Self::Int96(_) => PhysicalType::Int96,
            Self::Float(_) => PhysicalType::Float,
            Self::Double(_) => PhysicalType::Double,
            Self::ByteArray(_) => PhysicalType::ByteArray,
            Self::FixedLenByteArray(_) => PhysicalType::FixedLenByteArray,
        }
    }

    pub fn init(&mut self, data: &'a [u8]) {
        with_decoder!(self, d => d.init(data))
    }

    /// Decodes into a tagged output slice. The tag must match the decoder's
    /// physical type; otherwise nothing is decoded and the error is
    /// `InvalidConfiguration`.
    pub fn decode(&mut self, out: ValuesMut<'_, 'a>) -> DecodeResult {
        match (self, out) {
            (Self::Boolean(d), ValuesMut::Boolean(v)) => d.decode(v),
            (Self::Int32(d), ValuesMut::Int32(v)) => d.decode(v),
            (Self::Int64(d), ValuesMut::Int64(v)) => d.decode(v),
            (Self::Int96(d), ValuesMut::Int96(v)) => d.decode(v),
            (Self::Float(d), ValuesMut::Float(v)) => d.decode(v),
            (Self::Double(d), ValuesMut::Double(v)) => d.decode(v),
            (Self::ByteArray(d), ValuesMut::Bytes(v)) => d.decode(v),
            (Self::FixedLenByteArray(d), ValuesMut::Bytes(v)) => d.decode(v),
            (decoder, out) => Err(PartialDecode::new(
                0,
                DecodeError::InvalidConfiguration(format!(
                    "{} decoder cannot write into {} output",
                    decoder.physical_type(),
                    out.kind()
                )),
            )),
        }
    }

    /// Decodes into dynamically-typed values.
    pub fn decode_dynamic(&mut self, out: &mut [Value<'a>]) -> DecodeResult {
        with_decoder!(self, d => d.decode_dynamic(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::typed_slice_to_le_bytes;

    #[test]
    fn test_dispatch_matching_output() {
        let bytes = typed_slice_to_le_bytes(&[3.5f32, -1.0]);
        let mut decoder = AnyPlainDecoder::new(PhysicalType::Float, None).unwrap();
        decoder.init(&bytes);

        let mut out = [0f32; 2];
        assert_eq!(decoder.decode(ValuesMut::Float(&mut out)).unwrap(), 2);
        assert_eq!(out, [3.5, -1.0]);
    }

    #[test]
    fn test_mismatched_output_is_configuration_error() {
        let bytes = typed_slice_to_le_bytes(&[1i32]);
        let mut decoder = AnyPlainDecoder::new(PhysicalType::Int32, None).unwrap();
        decoder.init(&bytes);

        let mut out = [0f64; 1];
        let err = decoder.decode(ValuesMut::Double(&mut out)).unwrap_err();
        assert_eq!(err.values_decoded, 0);
        assert!(matches!(err.source, DecodeError::InvalidConfiguration(_)));
        assert!(!err.source.is_data_error());

        // The cursor did not move: the value is still there.
        let mut ints = [0i32; 1];
        assert_eq!(decoder.decode(ValuesMut::Int32(&mut ints)).unwrap(), 1);
        assert_eq!(ints, [1]);
    }

    #[test]
    fn test_fixed_len_requires_length() {
        assert!(AnyPlainDecoder::new(PhysicalType::FixedLenByteArray, None).is_err());
        let decoder = AnyPlainDecoder::new(PhysicalType::FixedLenByteArray, Some(16)).unwrap();
        assert_eq!(decoder.physical_type(), PhysicalType::FixedLenByteArray);
    }

    #[test]
    fn test_decode_dynamic_booleans() {
        let mut decoder = AnyPlainDecoder::new(PhysicalType::Boolean, None).unwrap();
        decoder.init(&[0b0000_0101]);
        let mut out = [Value::Null; 3];
        assert_eq!(decoder.decode_dynamic(&mut out).unwrap(), 3);
        assert_eq!(
            out,
            [Value::Boolean(true), Value::Boolean(false), Value::Boolean(true)]
        );
    }
}
