//! `ingest` command: fetch configured pages and turn them into stored chunks.

use tracing::{info, warn};

use crate::cli::output::Output;
use crate::rag::chunker::Chunker;
use crate::rag::fetch::PageFetcher;
use crate::rag::merger::merge_small_chunks;
use crate::rag::parse::parse_document;
use crate::rag::store::save_chunks;
use crate::types::{AppError, Chunk, Result};
use crate::utils::config::Config;

/// Handle the `ingest` subcommand
pub async fn handle_ingest(config: &Config, output: &Output) -> Result<()> {
    if config.sources.urls.is_empty() {
        return Err(AppError::Config(
            "No source URLs configured; add [sources].urls to vade.toml".to_string(),
        ));
    }

    output.header("Ingesting handbook pages");

    let fetcher = PageFetcher::new(&config.sources)?;
    let chunker = Chunker::new(&config.chunking);

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut next_id = 0u64;
    let mut pages_ok = 0usize;
    let mut pages_failed = 0usize;

    for url in &config.sources.urls {
        match ingest_page(&fetcher, &chunker, url, &mut next_id).await {
            Ok(mut page_chunks) => {
                output.info(&format!("{} -> {} chunks", url, page_chunks.len()));
                chunks.append(&mut page_chunks);
                pages_ok += 1;
            }
            Err(e) => {
                warn!(url = %url, error = %e, "failed to ingest page");
                output.warning(&format!("{}: {}", url, e));
                pages_failed += 1;
            }
        }
    }

    if chunks.is_empty() {
        return Err(AppError::Parse(
            "No chunks were produced from the configured pages".to_string(),
        ));
    }

    let emitted = chunks.len();
    let chunks = merge_small_chunks(chunks, config.chunking.min_chunk_words);
    info!(emitted, merged = chunks.len(), "chunking complete");

    let chunks_path = config.storage.chunks_path();
    save_chunks(&chunks_path, &chunks).await?;

    output.header("Summary");
    output.kv("pages fetched", &pages_ok.to_string());
    if pages_failed > 0 {
        output.kv("pages failed", &pages_failed.to_string());
    }
    output.kv("chunks emitted", &emitted.to_string());
    output.kv("chunks after merging", &chunks.len().to_string());
    output.newline();
    output.success(&format!(
        "Wrote {} chunks to {}",
        chunks.len(),
        chunks_path.display()
    ));
    output.hint("Next, embed the chunks and build the index:");
    output.command("vade embed");

    Ok(())
}

/// Fetch one page and chunk it, threading the shared id counter through.
async fn ingest_page(
    fetcher: &PageFetcher,
    chunker: &Chunker,
    url: &str,
    next_id: &mut u64,
) -> Result<Vec<Chunk>> {
    let html = fetcher.fetch(url).await?;
    let document = parse_document(&html)?;
    Ok(chunker.chunk_document(&document, url, next_id))
}
