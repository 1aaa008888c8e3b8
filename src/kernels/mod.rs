//! This module collects the pure, stateless byte-level kernels the decoders are
//! built from. Nothing here keeps state between calls.

/// Run headers: unsigned LEB128 varints.
pub mod varint;

/// Bit-packed groups: one unpack function per bit width.
pub mod unpack;
