//! This module defines the canonical, type-safe representation of the physical
//! types a column page can be PLAIN-encoded as, plus the value types that are
//! not plain Rust primitives.

use arrow_schema::{DataType as ArrowDataType, TimeUnit};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical storage type of a column, as recorded in the file schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray,
}

impl PhysicalType {
    /// Bytes occupied by one PLAIN-encoded value, for the types where that is fixed.
    ///
    /// `Boolean` is bit-packed and `ByteArray` is length-prefixed, so both return `None`;
    /// `FixedLenByteArray` takes its width from the schema, not from the type.
    pub fn plain_width(&self) -> Option<usize> {
        match self {
            Self::Int32 | Self::Float => Some(4),
            Self::Int64 | Self::Double => Some(8),
            Self::Int96 => Some(12),
            Self::Boolean | Self::ByteArray | Self::FixedLenByteArray => None,
        }
    }

    /// The Arrow `DataType` a reader materializes this physical type into when no
    /// logical annotation says otherwise.
    pub fn to_arrow_type(&self, type_length: Option<usize>) -> ArrowDataType {
        match self {
            Self::Boolean => ArrowDataType::Boolean,
            Self::Int32 => ArrowDataType::Int32,
            Self::Int64 => ArrowDataType::Int64,
            // INT96 only ever carries legacy nanosecond timestamps.
            Self::Int96 => ArrowDataType::Timestamp(TimeUnit::Nanosecond, None),
            Self::Float => ArrowDataType::Float32,
            Self::Double => ArrowDataType::Float64,
            Self::ByteArray => ArrowDataType::Binary,
            Self::FixedLenByteArray => match type_length.and_then(|l| i32::try_from(l).ok()) {
                Some(len) => ArrowDataType::FixedSizeBinary(len),
                None => ArrowDataType::Binary,
            },
        }
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the names used by the file format's schema.
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Int96 => "INT96",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::ByteArray => "BYTE_ARRAY",
            Self::FixedLenByteArray => "FIXED_LEN_BYTE_ARRAY",
        };
        f.write_str(name)
    }
}

/// A 96-bit integer stored as three little-endian 32-bit words, low word first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Int96(pub [u32; 3]);

impl Int96 {
    pub const WIDTH: usize = 12;

    pub fn from_le_bytes(bytes: [u8; 12]) -> Self {
        let word = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Int96([word(0), word(4), word(8)])
    }

    /// Nanoseconds within the day, as written by legacy timestamp writers.
    pub fn nanos_of_day(&self) -> u64 {
        (self.0[1] as u64) << 32 | self.0[0] as u64
    }

    /// Julian day number.
    pub fn julian_day(&self) -> u32 {
        self.0[2]
    }
}

/// A single decoded value of any physical type.
///
/// Byte arrays borrow from the page buffer they were decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value<'a> {
    #[default]
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Int96(Int96),
    Float(f32),
    Double(f64),
    Bytes(&'a [u8]),
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

impl_value_from!(
    bool => Boolean,
    i32 => Int32,
    i64 => Int64,
    Int96 => Int96,
    f32 => Float,
    f64 => Double,
);

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(v: &'a [u8]) -> Self {
        Value::Bytes(v)
    }
}
