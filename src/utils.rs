//! This module provides a set of shared, low-level utility functions used by
//! fixtures, benches and writers that need PLAIN-encoded bytes.

use bytemuck;

/// Converts a slice of primitives into their PLAIN byte representation.
///
/// This function performs a memory copy to create a new, owned byte vector.
/// PLAIN is little-endian, so on big-endian targets each value is byte-swapped
/// first.
pub fn typed_slice_to_le_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    let mut bytes: Vec<u8> = bytemuck::cast_slice(data).to_vec();
    if cfg!(target_endian = "big") {
        let size = std::mem::size_of::<T>();
        for value in bytes.chunks_exact_mut(size) {
            value.reverse();
        }
    }
    bytes
}
