//! The chunk store and its pairing with the vector index.
//!
//! The embed stage writes two files that only mean anything together:
//! `store.json` holds chunk metadata plus the embedding model and
//! dimensionality it was built with, and `index.bin` holds the vectors.
//! Position i in the store corresponds to vector i in the index. Loading
//! goes through [`open_pair`], which refuses any pair whose halves disagree,
//! rather than trusting that the files on disk match.

use crate::types::{AppError, Chunk, Result, Timestamp};
use crate::utils::config::StorageConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use vade_vector::FlatIndex;

/// Current chunk store format version.
pub const STORE_VERSION: u16 = 1;

/// The metadata half of the retrieval pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkStore {
    /// Store format version.
    pub version: u16,
    /// Embedding model that produced the paired index's vectors.
    pub embedding_model: String,
    /// Dimensionality of the paired index.
    pub dimensions: usize,
    /// When the pair was built.
    pub created_at: Timestamp,
    /// Chunk metadata; position i corresponds to vector i in the index.
    pub chunks: Vec<Chunk>,
}

impl ChunkStore {
    /// Assemble a store for a freshly built index.
    pub fn new(embedding_model: impl Into<String>, dimensions: usize, chunks: Vec<Chunk>) -> Self {
        Self {
            version: STORE_VERSION,
            embedding_model: embedding_model.into(),
            dimensions,
            created_at: chrono::Utc::now(),
            chunks,
        }
    }

    /// Write the store as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Store(format!("Failed to serialize chunk store: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, json).await?;

        info!(path = %path.display(), chunks = self.chunks.len(), "Saved chunk store");
        Ok(())
    }

    /// Read a store back, rejecting unknown format versions.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = read_artifact(path, "vade embed").await?;
        let store: ChunkStore = serde_json::from_str(&json)
            .map_err(|e| AppError::Store(format!("Failed to parse {}: {}", path.display(), e)))?;

        if store.version != STORE_VERSION {
            return Err(AppError::Store(format!(
                "Unsupported chunk store version {} (supported: {})",
                store.version, STORE_VERSION
            )));
        }

        debug!(path = %path.display(), chunks = store.chunks.len(), "Loaded chunk store");
        Ok(store)
    }
}

/// Load the store and index as a matched pair.
///
/// The pair is rejected when the halves disagree on dimensionality or
/// length, or when the store was built with a different embedding model
/// than the one configured. Querying across any of those mismatches would
/// silently return garbage, so all three are load-time failures.
pub async fn open_pair(
    storage: &StorageConfig,
    expected_model: &str,
) -> Result<(ChunkStore, FlatIndex)> {
    let store = ChunkStore::load(&storage.store_path()).await?;
    let index = vade_vector::load_index(&storage.index_path())
        .await
        .map_err(|e| match e {
            vade_vector::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                AppError::Store(format!(
                    "No index at {}; run `vade embed` first",
                    storage.index_path().display()
                ))
            }
            other => AppError::Index(other),
        })?;

    if store.dimensions != index.dimensions() {
        return Err(AppError::Consistency(format!(
            "Store records {} dimensions but the index has {}",
            store.dimensions,
            index.dimensions()
        )));
    }
    if store.chunks.len() != index.len() {
        return Err(AppError::Consistency(format!(
            "Store holds {} chunks but the index holds {} vectors",
            store.chunks.len(),
            index.len()
        )));
    }
    if store.embedding_model != expected_model {
        return Err(AppError::Store(format!(
            "Store was built with embedding model {} but {} is configured; run `vade embed` to rebuild",
            store.embedding_model, expected_model
        )));
    }

    info!(
        chunks = store.chunks.len(),
        dimensions = store.dimensions,
        "Opened retrieval pair"
    );
    Ok((store, index))
}

/// Write the merged chunk sequence produced by ingest.
pub async fn save_chunks(path: &Path, chunks: &[Chunk]) -> Result<()> {
    let json = serde_json::to_string_pretty(chunks)
        .map_err(|e| AppError::Store(format!("Failed to serialize chunks: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, json).await?;

    info!(path = %path.display(), chunks = chunks.len(), "Saved chunks");
    Ok(())
}

/// Read the chunk sequence written by ingest.
pub async fn load_chunks(path: &Path) -> Result<Vec<Chunk>> {
    let json = read_artifact(path, "vade ingest").await?;
    serde_json::from_str(&json)
        .map_err(|e| AppError::Store(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read a pipeline artifact, pointing at the producing command when missing.
async fn read_artifact(path: &Path, producer: &str) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => Ok(json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::Store(format!(
            "No file at {}; run `{}` first",
            path.display(),
            producer
        ))),
        Err(e) => Err(e.into()),
    }
}
