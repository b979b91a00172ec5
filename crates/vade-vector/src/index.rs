//! Flat exact nearest-neighbor index.
//!
//! Vectors are stored contiguously in insertion order and searched by brute
//! force. Every query computes the squared L2 distance to every stored vector,
//! so results are exact, and a vector's position (0-based insertion order) is
//! its identity. The index is append-only: no update or delete.

use crate::distance::squared_l2;
use crate::error::{Error, Result};
use crate::IndexStats;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single search hit: the stored vector's position and its squared L2
/// distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// 0-based insertion position of the matched vector.
    pub position: usize,
    /// Squared L2 distance from the query.
    pub distance: f32,
}

/// Flat exact index over fixed-dimension `f32` vectors.
#[derive(Debug)]
pub struct FlatIndex {
    /// Vector dimensions.
    dimensions: usize,
    /// Contiguous vector storage, `len() * dimensions` floats.
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidVector("Dimensions must be > 0".to_string()));
        }

        Ok(Self {
            dimensions,
            data: Vec::new(),
        })
    }

    /// Create an empty index with room for `capacity` vectors.
    pub fn with_capacity(dimensions: usize, capacity: usize) -> Result<Self> {
        let mut index = Self::new(dimensions)?;
        index.data.reserve(capacity * dimensions);
        Ok(index)
    }

    /// Build an index from an ordered vector sequence in one pass.
    ///
    /// Position i in the index corresponds to `vectors[i]`. Fails on the
    /// first dimension mismatch or non-finite value; nothing is kept on
    /// failure.
    pub fn build<V: AsRef<[f32]>>(dimensions: usize, vectors: &[V]) -> Result<Self> {
        let mut index = Self::with_capacity(dimensions, vectors.len())?;
        for vector in vectors {
            index.add(vector.as_ref())?;
        }
        debug!(count = index.len(), dimensions, "Built flat index");
        Ok(index)
    }

    /// Append a vector, returning its position.
    pub fn add(&mut self, vector: &[f32]) -> Result<usize> {
        self.validate(vector)?;
        let position = self.len();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    /// Append multiple vectors in order, returning how many were added.
    ///
    /// Stops at the first invalid vector; previously appended vectors from
    /// this batch are kept (positions already handed out stay valid).
    pub fn add_batch<'a, I>(&mut self, vectors: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a [f32]>,
    {
        let mut count = 0;
        for vector in vectors {
            self.add(vector)?;
            count += 1;
        }
        debug!(count, total = self.len(), "Appended vector batch");
        Ok(count)
    }

    /// Exact top-k search by ascending squared L2 distance.
    ///
    /// Returns `min(k, len())` hits. Equal distances are ordered by lower
    /// position, so results are deterministic for a fixed index.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.validate(query)?;

        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(position, stored)| Neighbor {
                position,
                distance: squared_l2(query, stored),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Get a stored vector by position.
    pub fn get(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dimensions)?;
        self.data.get(start..start + self.dimensions)
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimensions
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector dimensionality accepted by this index.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Approximate heap memory held by the index, in bytes.
    pub fn memory_usage(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<f32>()
    }

    /// Get index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            vector_count: self.len(),
            dimensions: self.dimensions,
            memory_bytes: self.memory_usage(),
        }
    }

    /// Reconstruct an index from persisted parts.
    pub(crate) fn from_raw_parts(dimensions: usize, data: Vec<f32>) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::Persistence(
                "Stored index has zero dimensions".to_string(),
            ));
        }
        if data.len() % dimensions != 0 {
            return Err(Error::Persistence(format!(
                "Stored data length {} is not a multiple of dimensions {}",
                data.len(),
                dimensions
            )));
        }
        Ok(Self { dimensions, data })
    }

    /// Borrow the raw storage for persistence.
    pub(crate) fn raw_data(&self) -> &[f32] {
        &self.data
    }

    fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        if vector.iter().any(|v| v.is_nan() || v.is_infinite()) {
            return Err(Error::InvalidVector(
                "Vector contains NaN or Inf".to_string(),
            ));
        }

        Ok(())
    }
}
