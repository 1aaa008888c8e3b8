// In: src/error.rs

//! This module defines the single, unified error type for the pqvalues decoders.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use std::fmt;

use thiserror::Error;

/// The two kinds of run found in an RLE/bit-packing hybrid stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Rle,
    BitPacked,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::Rle => f.write_str("RLE"),
            RunKind::BitPacked => f.write_str("bit-packed"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    // =========================================================================
    // === Data Errors (the input bytes are short or corrupt)
    // =========================================================================
    /// At least one value was requested but the cursor was already at the end.
    #[error("{0}: no more data")]
    NoMoreData(&'static str),

    /// A value, run header, repeated value or bit-packed group was cut off.
    #[error("{context}: not enough data (needed {needed} bytes, {available} available)")]
    NotEnoughData {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Malformed varint run header: {0}")]
    MalformedVarint(String),

    /// A run header declared zero values. Always an encoder bug.
    #[error("rle: empty {0} run")]
    EmptyRun(RunKind),

    // =========================================================================
    // === Configuration Errors (caller mistakes, never caused by the data)
    // =========================================================================
    #[error("Invalid decoder configuration: {0}")]
    InvalidConfiguration(String),

    /// An error from the Serde JSON library while loading a column descriptor.
    #[error("Column descriptor error: {0}")]
    Config(#[from] serde_json::Error),
}

impl DecodeError {
    /// Returns `true` if the error was caused by short or corrupt input bytes,
    /// `false` if it points at a programming or configuration mistake.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            DecodeError::NoMoreData(_)
                | DecodeError::NotEnoughData { .. }
                | DecodeError::MalformedVarint(_)
                | DecodeError::EmptyRun(_)
        )
    }
}

/// A failed decode call. The first `values_decoded` slots of the output were
/// written before `source` occurred and remain valid.
#[derive(Error, Debug)]
#[error("{source} (after {values_decoded} values)")]
pub struct PartialDecode {
    pub values_decoded: usize,
    #[source]
    pub source: DecodeError,
}

impl PartialDecode {
    pub fn new(values_decoded: usize, source: DecodeError) -> Self {
        Self {
            values_decoded,
            source,
        }
    }

    pub fn error(&self) -> &DecodeError {
        &self.source
    }

    pub fn into_error(self) -> DecodeError {
        self.source
    }
}

/// The outcome of one decode call: the number of values written, or the
/// failure together with the count written before it.
pub type DecodeResult = Result<usize, PartialDecode>;
