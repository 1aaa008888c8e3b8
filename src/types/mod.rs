//! This module defines the core, strongly-typed data representations shared by
//! the decoders: the physical column types and the dynamically-typed `Value`.

pub mod physical_type;

// Re-export the main type(s) for easier access.
pub use physical_type::{Int96, PhysicalType, Value};
