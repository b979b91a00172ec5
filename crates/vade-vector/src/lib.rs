//! # vade-vector
//!
//! A small, pure-Rust, exact nearest-neighbor index for fixed-dimension
//! `f32` embedding vectors.
//!
//! Unlike approximate structures (HNSW, IVF), [`FlatIndex`] stores vectors
//! contiguously and scans all of them per query, computing squared L2
//! distances. For corpora in the hundreds-to-thousands range this is both
//! faster to build and trivially exact, and the vector's insertion position
//! doubles as its identity, so callers can keep metadata in a parallel
//! sequence.
//!
//! ## Example
//!
//! ```
//! use vade_vector::FlatIndex;
//!
//! # fn main() -> vade_vector::Result<()> {
//! let vectors = vec![vec![0.0_f32, 1.0], vec![1.0, 0.0], vec![0.9, 0.1]];
//! let index = FlatIndex::build(2, &vectors)?;
//!
//! let hits = index.search(&[1.0, 0.0], 2)?;
//! assert_eq!(hits[0].position, 1);
//! assert_eq!(hits[0].distance, 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Persistence
//!
//! [`save_index`] / [`load_index`] write and read a single opaque binary
//! file. The crate does not manage any metadata stored alongside the index;
//! keeping the two aligned is the caller's contract.

#![warn(missing_docs)]

pub mod distance;
pub mod error;
pub mod index;
pub mod persistence;

pub use distance::{similarity_from_distance, squared_l2};
pub use error::{Error, Result};
pub use index::{FlatIndex, Neighbor};
pub use persistence::{load_index, save_index};

/// Summary statistics for an index.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Number of stored vectors.
    pub vector_count: usize,
    /// Vector dimensionality.
    pub dimensions: usize,
    /// Approximate heap memory used, in bytes.
    pub memory_bytes: usize,
}
