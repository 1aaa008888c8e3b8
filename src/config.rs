// In: src/config.rs

//! The per-column parameters the decoders consume.
//!
//! The schema layer builds a `ColumnDescriptor` for every leaf column (or it
//! is loaded from JSON, e.g. in fixtures) and hands it down read-only. The
//! descriptor is trusted: it is checked only as far as decoder construction
//! needs, not for schema semantics.

use serde::{Deserialize, Serialize};

use crate::decoders::{bit_width_for_max_level, AnyPlainDecoder, HybridDecoder};
use crate::error::DecodeError;
use crate::types::PhysicalType;

/// Scalar parameters of one leaf column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ColumnDescriptor {
    /// Physical storage type of the values.
    pub physical_type: PhysicalType,

    /// Width in bytes of a `FixedLenByteArray` value. Ignored for other types.
    #[serde(default)]
    pub type_length: Option<usize>,

    /// Highest definition level; 0 for a required column with required ancestors.
    #[serde(default)]
    pub max_definition_level: u32,

    /// Highest repetition level; 0 for a column outside any repeated group.
    #[serde(default)]
    pub max_repetition_level: u32,
}

impl ColumnDescriptor {
    pub fn new(physical_type: PhysicalType) -> Self {
        Self {
            physical_type,
            type_length: None,
            max_definition_level: 0,
            max_repetition_level: 0,
        }
    }

    /// Parses a descriptor from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn definition_bit_width(&self) -> u32 {
        bit_width_for_max_level(self.max_definition_level)
    }

    pub fn repetition_bit_width(&self) -> u32 {
        bit_width_for_max_level(self.max_repetition_level)
    }

    /// An unbound PLAIN decoder for this column's values.
    pub fn plain_decoder<'a>(&self) -> Result<AnyPlainDecoder<'a>, DecodeError> {
        AnyPlainDecoder::new(self.physical_type, self.type_length)
    }

    /// An unbound definition-level decoder, or `None` when the column stores no
    /// definition levels.
    pub fn definition_level_decoder<'a>(&self) -> Result<Option<HybridDecoder<'a>>, DecodeError> {
        Self::level_decoder(self.definition_bit_width())
    }

    /// An unbound repetition-level decoder, or `None` when the column stores no
    /// repetition levels.
    pub fn repetition_level_decoder<'a>(&self) -> Result<Option<HybridDecoder<'a>>, DecodeError> {
        Self::level_decoder(self.repetition_bit_width())
    }

    fn level_decoder<'a>(bit_width: u32) -> Result<Option<HybridDecoder<'a>>, DecodeError> {
        if bit_width == 0 {
            return Ok(None);
        }
        HybridDecoder::new(bit_width).map(Some)
    }
}
