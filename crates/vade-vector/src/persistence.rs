//! Persistence layer for vade-vector.
//!
//! An index is saved as a single postcard-encoded binary file. The file is
//! opaque to callers; alignment with any external metadata kept alongside it
//! is the caller's responsibility.

use crate::error::{Error, Result};
use crate::index::FlatIndex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Bumped whenever the on-disk layout changes.
const FORMAT_VERSION: u16 = 1;

/// On-disk representation of a flat index.
#[derive(Serialize, Deserialize)]
struct StoredIndex {
    version: u16,
    dimensions: u64,
    data: Vec<f32>,
}

/// Save an index to `path`, overwriting any existing file.
pub async fn save_index<P: AsRef<Path>>(path: P, index: &FlatIndex) -> Result<()> {
    let stored = StoredIndex {
        version: FORMAT_VERSION,
        dimensions: index.dimensions() as u64,
        data: index.raw_data().to_vec(),
    };

    let bytes = postcard::to_allocvec(&stored)
        .map_err(|e| Error::Persistence(format!("Failed to encode index: {}", e)))?;

    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path.as_ref(), &bytes).await?;

    info!(
        path = %path.as_ref().display(),
        count = index.len(),
        bytes = bytes.len(),
        "Saved index"
    );
    Ok(())
}

/// Load an index previously written by [`save_index`].
pub async fn load_index<P: AsRef<Path>>(path: P) -> Result<FlatIndex> {
    let bytes = tokio::fs::read(path.as_ref()).await?;

    let stored: StoredIndex = postcard::from_bytes(&bytes)
        .map_err(|e| Error::Persistence(format!("Failed to decode index: {}", e)))?;

    if stored.version != FORMAT_VERSION {
        return Err(Error::Persistence(format!(
            "Unsupported index format version {} (expected {})",
            stored.version, FORMAT_VERSION
        )));
    }

    let index = FlatIndex::from_raw_parts(stored.dimensions as usize, stored.data)?;

    debug!(
        path = %path.as_ref().display(),
        count = index.len(),
        dimensions = index.dimensions(),
        "Loaded index"
    );
    Ok(index)
}
