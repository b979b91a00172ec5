//! `embed` command: embed stored chunks and build the vector index.

use tracing::info;
use vade_vector::FlatIndex;

use crate::cli::output::Output;
use crate::rag::embeddings::create_embedding_provider;
use crate::rag::store::{load_chunks, ChunkStore};
use crate::types::{AppError, Result};
use crate::utils::config::Config;

/// Handle the `embed` subcommand
pub async fn handle_embed(config: &Config, output: &Output) -> Result<()> {
    let chunks = load_chunks(&config.storage.chunks_path()).await?;
    if chunks.is_empty() {
        return Err(AppError::Store(
            "The chunks file is empty; run `vade ingest` first".to_string(),
        ));
    }

    let provider = create_embedding_provider(&config.embedding)?;

    output.header("Building the vector index");
    output.info(&format!(
        "Embedding {} chunks with {}",
        chunks.len(),
        provider.model_name()
    ));

    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let vectors = provider.embed_many(&texts).await?;

    let index = FlatIndex::build(provider.dimensions(), &vectors)?;
    let store = ChunkStore::new(provider.model_name(), provider.dimensions(), chunks);

    store.save(&config.storage.store_path()).await?;
    vade_vector::save_index(&config.storage.index_path(), &index).await?;

    let stats = index.stats();
    info!(
        vectors = stats.vector_count,
        dimensions = stats.dimensions,
        "index built"
    );

    output.kv("vectors", &stats.vector_count.to_string());
    output.kv("dimensions", &stats.dimensions.to_string());
    output.kv("memory", &format_bytes(stats.memory_bytes));
    output.newline();
    output.success(&format!(
        "Wrote {} and {}",
        config.storage.store_path().display(),
        config.storage.index_path().display()
    ));
    output.hint("Try a search or ask a question:");
    output.command("vade ask");

    Ok(())
}

fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KIB * KIB {
        format!("{:.1} MiB", value / (KIB * KIB))
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}
