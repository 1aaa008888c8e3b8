//! This file is the root of the `pqvalues` crate: the value-decoding core of a
//! columnar (Parquet) page reader.
//!
//! Its responsibilities are strictly limited to declaring the modules and
//! re-exporting the types a page reader needs:
//! 1.  PLAIN decoders for every physical type (`decoders::plain`, `decoders::dynamic`).
//! 2.  The RLE/bit-packing hybrid decoder for levels and dictionary indices
//!     (`decoders::hybrid`).
//!
//! Decoders never allocate output storage and never perform I/O: they read
//! from a borrowed page buffer into caller-owned slices.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod decoders;
pub mod error;
pub mod kernels;
pub mod observability;
pub mod traits;
pub mod types;
pub mod utils;

//==================================================================================
// 2. Re-exports
//==================================================================================
pub use config::ColumnDescriptor;
pub use decoders::{AnyPlainDecoder, HybridDecoder, PlainDecoder, ValuesMut};
pub use error::{DecodeError, DecodeResult, PartialDecode, RunKind};
pub use types::{Int96, PhysicalType, Value};
