//! PLAIN decoders: one per physical type.
//!
//! Every decoder borrows the page buffer and keeps a cursor into it. A call
//! fills as much of the caller's output as the remaining bytes allow and never
//! writes a value it could not read completely.

use bitvec::prelude::*;
use std::marker::PhantomData;

use super::PlainDecoder;
use crate::error::{DecodeError, DecodeResult, PartialDecode};
use crate::traits::PlainType;
use crate::types::Int96;

//==================================================================================
// 1. Shared Fixed-Width Loop
//==================================================================================

/// Fills `out` with `width`-byte values starting at `*pos`.
///
/// Stops cleanly when the buffer ends on a value boundary. A trailing partial
/// value is `NotEnoughData`; nothing at all to read is `NoMoreData`.
fn fill_fixed<'a, T>(
    data: &'a [u8],
    pos: &mut usize,
    width: usize,
    context: &'static str,
    out: &mut [T],
    read: impl Fn(&'a [u8]) -> T,
) -> DecodeResult {
    if out.is_empty() {
        return Ok(0);
    }

    let mut decoded = 0;
    for slot in out.iter_mut() {
        let rest = &data[*pos..];
        if rest.is_empty() {
            break;
        }
        if rest.len() < width {
            return Err(PartialDecode::new(
                decoded,
                DecodeError::NotEnoughData {
                    context,
                    needed: width,
                    available: rest.len(),
                },
            ));
        }
        *slot = read(&rest[..width]);
        *pos += width;
        decoded += 1;
    }

    if decoded == 0 {
        return Err(PartialDecode::new(0, DecodeError::NoMoreData(context)));
    }
    Ok(decoded)
}

//==================================================================================
// 2. Fixed-Width Primitives
//==================================================================================

/// Decoder for any primitive with a fixed little-endian width.
#[derive(Debug, Clone, Default)]
pub struct FixedWidthDecoder<'a, T: PlainType> {
    data: &'a [u8],
    pos: usize,
    _marker: PhantomData<T>,
}

pub type Int32PlainDecoder<'a> = FixedWidthDecoder<'a, i32>;
pub type Int64PlainDecoder<'a> = FixedWidthDecoder<'a, i64>;
pub type Int96PlainDecoder<'a> = FixedWidthDecoder<'a, Int96>;
pub type FloatPlainDecoder<'a> = FixedWidthDecoder<'a, f32>;
pub type DoublePlainDecoder<'a> = FixedWidthDecoder<'a, f64>;

impl<'a, T: PlainType> FixedWidthDecoder<'a, T> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            _marker: PhantomData,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a, T> PlainDecoder<'a> for FixedWidthDecoder<'a, T>
where
    T: PlainType + Into<crate::types::Value<'a>>,
{
    type Item = T;

    fn init(&mut self, data: &'a [u8]) {
        self.data = data;
        self.pos = 0;
    }

    fn decode(&mut self, out: &mut [T]) -> DecodeResult {
        fill_fixed(self.data, &mut self.pos, T::WIDTH, T::CONTEXT, out, T::from_le_slice)
    }
}

//==================================================================================
// 3. Booleans (bit-packed, LSB first)
//==================================================================================

const BOOLEAN_CONTEXT: &str = "boolean/plain";

/// Decoder for PLAIN booleans: one bit per value, bit 0 of each byte first.
#[derive(Debug, Clone)]
pub struct BooleanPlainDecoder<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
    pos: usize,
}

impl<'a> BooleanPlainDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            bits: BitSlice::<u8, Lsb0>::from_slice(data),
            pos: 0,
        }
    }
}

impl Default for BooleanPlainDecoder<'_> {
    fn default() -> Self {
        BooleanPlainDecoder::new(&[])
    }
}

impl<'a> PlainDecoder<'a> for BooleanPlainDecoder<'a> {
    type Item = bool;

    fn init(&mut self, data: &'a [u8]) {
        self.bits = BitSlice::<u8, Lsb0>::from_slice(data);
        self.pos = 0;
    }

    fn decode(&mut self, out: &mut [bool]) -> DecodeResult {
        if out.is_empty() {
            return Ok(0);
        }
        let available = self.bits.len() - self.pos;
        if available == 0 {
            return Err(PartialDecode::new(0, DecodeError::NoMoreData(BOOLEAN_CONTEXT)));
        }

        let n = out.len().min(available);
        let bits = &self.bits[self.pos..self.pos + n];
        for (slot, bit) in out.iter_mut().zip(bits.iter().by_vals()) {
            *slot = bit;
        }
        self.pos += n;
        Ok(n)
    }
}

//==================================================================================
// 4. Byte Arrays
//==================================================================================

const FIXED_LEN_CONTEXT: &str = "fixed_len_byte_array/plain";
const BYTE_ARRAY_CONTEXT: &str = "byte_array/plain";

/// Decoder for FIXED_LEN_BYTE_ARRAY. Values are sub-slices of the page buffer.
#[derive(Debug, Clone)]
pub struct FixedLenByteArrayPlainDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    type_length: usize,
}

impl<'a> FixedLenByteArrayPlainDecoder<'a> {
    /// Fails with `InvalidConfiguration` for a zero `type_length`.
    pub fn new(type_length: usize) -> Result<Self, DecodeError> {
        if type_length == 0 {
            return Err(DecodeError::InvalidConfiguration(
                "FIXED_LEN_BYTE_ARRAY requires a type length > 0".to_string(),
            ));
        }
        Ok(Self {
            data: &[],
            pos: 0,
            type_length,
        })
    }

    pub fn type_length(&self) -> usize {
        self.type_length
    }
}

impl<'a> PlainDecoder<'a> for FixedLenByteArrayPlainDecoder<'a> {
    type Item = &'a [u8];

    fn init(&mut self, data: &'a [u8]) {
        self.data = data;
        self.pos = 0;
    }

    fn decode(&mut self, out: &mut [&'a [u8]]) -> DecodeResult {
        fill_fixed(
            self.data,
            &mut self.pos,
            self.type_length,
            FIXED_LEN_CONTEXT,
            out,
            |bytes| bytes,
        )
    }
}

/// Decoder for BYTE_ARRAY: a 4-byte little-endian length, then that many bytes.
#[derive(Debug, Clone, Default)]
pub struct ByteArrayPlainDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteArrayPlainDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next_value(&mut self) -> Result<&'a [u8], DecodeError> {
        let data: &'a [u8] = self.data;
        let rest = &data[self.pos..];
        if rest.len() < 4 {
            return Err(DecodeError::NotEnoughData {
                context: BYTE_ARRAY_CONTEXT,
                needed: 4,
                available: rest.len(),
            });
        }
        let len = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let value = rest[4..].get(..len).ok_or(DecodeError::NotEnoughData {
            context: BYTE_ARRAY_CONTEXT,
            needed: 4 + len,
            available: rest.len(),
        })?;
        self.pos += 4 + len;
        Ok(value)
    }
}

impl<'a> PlainDecoder<'a> for ByteArrayPlainDecoder<'a> {
    type Item = &'a [u8];

    fn init(&mut self, data: &'a [u8]) {
        self.data = data;
        self.pos = 0;
    }

    fn decode(&mut self, out: &mut [&'a [u8]]) -> DecodeResult {
        if out.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.data.len() {
            return Err(PartialDecode::new(0, DecodeError::NoMoreData(BYTE_ARRAY_CONTEXT)));
        }

        let mut decoded = 0;
        for slot in out.iter_mut() {
            if self.pos >= self.data.len() {
                break;
            }
            *slot = self
                .next_value()
                .map_err(|e| PartialDecode::new(decoded, e))?;
            decoded += 1;
        }
        Ok(decoded)
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;
    use crate::utils::typed_slice_to_le_bytes;
    use rand::Rng;

    fn decode_booleans(data: &[u8], n: usize) -> Vec<bool> {
        let mut decoder = BooleanPlainDecoder::new(data);
        let mut out = vec![false; n];
        let decoded = decoder.decode(&mut out).unwrap();
        assert_eq!(decoded, n);
        out
    }

    #[test]
    fn test_boolean_plain_decoder() {
        assert_eq!(decode_booleans(&[0x00], 5), vec![false; 5]);
        assert_eq!(decode_booleans(&[0xFF], 3), vec![true; 3]);
        assert_eq!(
            decode_booleans(&[0b0110_1110], 8),
            vec![false, true, true, true, false, true, true, false]
        );
        assert_eq!(
            decode_booleans(&[0xFF, 0b0110_1110], 15),
            vec![
                true, true, true, true, true, true, true, true, false, true, true, true, false,
                true, true
            ]
        );
    }

    #[test]
    fn test_boolean_exhaustion() {
        let mut decoder = BooleanPlainDecoder::new(&[0x01]);
        let mut out = [false; 20];
        assert_eq!(decoder.decode(&mut out).unwrap(), 8);
        assert!(out[0] && !out[1]);

        let err = decoder.decode(&mut out).unwrap_err();
        assert_eq!(err.values_decoded, 0);
        assert!(matches!(err.source, DecodeError::NoMoreData(_)));
    }

    #[test]
    fn test_float_roundtrip_bit_identical() {
        let mut rng = rand::rng();
        let mut original: Vec<f32> = (0..64).map(|_| f32::from_bits(rng.random())).collect();
        original.extend([
            f32::NAN,
            f32::from_bits(0x7FC0_1234),
            f32::INFINITY,
            f32::NEG_INFINITY,
            -0.0,
            f32::MIN_POSITIVE,
        ]);
        let bytes = typed_slice_to_le_bytes(&original);

        let mut decoder = FloatPlainDecoder::new(&bytes);
        let mut out = vec![0f32; original.len()];
        assert_eq!(decoder.decode(&mut out).unwrap(), original.len());

        let expected: Vec<u32> = original.iter().map(|v| v.to_bits()).collect();
        let actual: Vec<u32> = out.iter().map(|v| v.to_bits()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_double_roundtrip_bit_identical() {
        let original = [1.5f64, -0.0, f64::NAN, f64::from_bits(0x7FF8_0000_DEAD_BEEF), f64::INFINITY];
        let bytes = typed_slice_to_le_bytes(&original);

        let mut decoder = DoublePlainDecoder::new(&bytes);
        let mut out = [0f64; 5];
        assert_eq!(decoder.decode(&mut out).unwrap(), 5);
        for (a, b) in out.iter().zip(original.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_short_buffer_keeps_complete_prefix() {
        // Two full floats and two stray bytes.
        let mut bytes = typed_slice_to_le_bytes(&[1.0f32, 2.0]);
        bytes.extend([0xAA, 0xBB]);

        let mut decoder = FloatPlainDecoder::new(&bytes);
        let mut out = [9.0f32; 4];
        let err = decoder.decode(&mut out).unwrap_err();
        assert_eq!(err.values_decoded, 2);
        assert!(matches!(
            err.source,
            DecodeError::NotEnoughData { needed: 4, available: 2, .. }
        ));
        assert_eq!(&out[..2], &[1.0, 2.0]);
        // The partial value was never written.
        assert_eq!(out[2], 9.0);
        assert_eq!(decoder.position(), 8);
    }

    #[test]
    fn test_clean_end_then_no_more_data() {
        let bytes = typed_slice_to_le_bytes(&[7i64, -7]);
        let mut decoder = Int64PlainDecoder::new(&bytes);
        let mut out = [0i64; 5];

        assert_eq!(decoder.decode(&mut out).unwrap(), 2);
        assert_eq!(&out[..2], &[7, -7]);

        let err = decoder.decode(&mut out).unwrap_err();
        assert_eq!(err.values_decoded, 0);
        assert!(matches!(err.source, DecodeError::NoMoreData("int64/plain")));
    }

    #[test]
    fn test_only_partial_value_is_not_enough_data() {
        let mut decoder = Int32PlainDecoder::new(&[1, 2, 3]);
        let mut out = [0i32; 1];
        let err = decoder.decode(&mut out).unwrap_err();
        assert_eq!(err.values_decoded, 0);
        assert!(matches!(err.source, DecodeError::NotEnoughData { .. }));
    }

    #[test]
    fn test_output_sized_requests_and_reinit() {
        let bytes = typed_slice_to_le_bytes(&[1i32, 2, 3, 4, 5]);
        let mut decoder = Int32PlainDecoder::default();
        decoder.init(&bytes);

        let mut out = [0i32; 2];
        assert_eq!(decoder.decode(&mut out).unwrap(), 2);
        assert_eq!(out, [1, 2]);
        assert_eq!(decoder.decode(&mut out).unwrap(), 2);
        assert_eq!(out, [3, 4]);
        assert_eq!(decoder.decode(&mut []).unwrap(), 0);

        decoder.init(&bytes);
        assert_eq!(decoder.decode(&mut out).unwrap(), 2);
        assert_eq!(out, [1, 2]);
    }

    #[test]
    fn test_int96_plain() {
        let bytes: Vec<u8> = (0u8..24).collect();
        let mut decoder = Int96PlainDecoder::new(&bytes);
        let mut out = [Int96::default(); 2];
        assert_eq!(decoder.decode(&mut out).unwrap(), 2);
        assert_eq!(out[0].0[0], u32::from_le_bytes([0, 1, 2, 3]));
        assert_eq!(out[1].0[2], u32::from_le_bytes([20, 21, 22, 23]));
    }

    #[test]
    fn test_fixed_len_byte_array() {
        assert!(matches!(
            FixedLenByteArrayPlainDecoder::new(0),
            Err(DecodeError::InvalidConfiguration(_))
        ));

        let data = b"abcdefg";
        let mut decoder = FixedLenByteArrayPlainDecoder::new(3).unwrap();
        decoder.init(data);
        let mut out: [&[u8]; 3] = [&[]; 3];
        let err = decoder.decode(&mut out).unwrap_err();
        assert_eq!(err.values_decoded, 2);
        assert_eq!(out[0], b"abc");
        assert_eq!(out[1], b"def");
        assert!(out[2].is_empty());
    }

    #[test]
    fn test_byte_array() {
        let mut data = Vec::new();
        for s in ["hello", "", "parquet"] {
            data.extend((s.len() as u32).to_le_bytes());
            data.extend(s.as_bytes());
        }
        let mut decoder = ByteArrayPlainDecoder::new(&data);
        let mut out: [&[u8]; 4] = [&[]; 4];
        assert_eq!(decoder.decode(&mut out).unwrap(), 3);
        assert_eq!(out[0], b"hello");
        assert_eq!(out[1], b"");
        assert_eq!(out[2], b"parquet");

        let err = decoder.decode(&mut out).unwrap_err();
        assert!(matches!(err.source, DecodeError::NoMoreData(_)));
    }

    #[test]
    fn test_byte_array_truncated_body() {
        let mut data = Vec::new();
        data.extend(2u32.to_le_bytes());
        data.extend(b"ok");
        data.extend(10u32.to_le_bytes());
        data.extend(b"short");

        let mut decoder = ByteArrayPlainDecoder::new(&data);
        let mut out: [&[u8]; 2] = [&[]; 2];
        let err = decoder.decode(&mut out).unwrap_err();
        assert_eq!(err.values_decoded, 1);
        assert!(matches!(
            err.source,
            DecodeError::NotEnoughData { needed: 14, available: 9, .. }
        ));
        assert_eq!(out[0], b"ok");
    }

    #[test]
    fn test_decode_dynamic_copies_prefix() {
        let bytes = typed_slice_to_le_bytes(&[0.5f64, 0.25]);
        let mut decoder = DoublePlainDecoder::new(&bytes);
        let mut out = [Value::Null; 3];
        assert_eq!(decoder.decode_dynamic(&mut out).unwrap(), 2);
        assert_eq!(out, [Value::Double(0.5), Value::Double(0.25), Value::Null]);

        let err = decoder.decode_dynamic(&mut out).unwrap_err();
        assert!(matches!(err.source, DecodeError::NoMoreData("double/plain")));
    }
}
