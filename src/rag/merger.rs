//! Folding of undersized chunks into their predecessors.

use crate::types::Chunk;
use tracing::debug;

/// Fold chunks below `min_chunk_words` into the preceding output chunk.
///
/// A single left-to-right pass. A small chunk merges only when the previous
/// chunk in the output shares its source URL and page title; the fold
/// appends a newline plus the small chunk's content to the predecessor and
/// adds the word counts. A small chunk with no eligible predecessor is kept
/// as-is. The predecessor is always the last chunk already emitted, so a
/// chunk that has absorbed one merge can absorb further ones.
///
/// Surviving chunks keep their original ids, so the output ids are a
/// strictly increasing subsequence of the input ids.
pub fn merge_small_chunks(chunks: Vec<Chunk>, min_chunk_words: usize) -> Vec<Chunk> {
    let input_len = chunks.len();
    let mut merged: Vec<Chunk> = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        if chunk.word_count < min_chunk_words {
            if let Some(prev) = merged.last_mut() {
                if prev.source_url == chunk.source_url && prev.page_title == chunk.page_title {
                    prev.content.push('\n');
                    prev.content.push_str(&chunk.content);
                    prev.word_count += chunk.word_count;
                    continue;
                }
            }
        }
        merged.push(chunk);
    }

    if merged.len() < input_len {
        debug!(
            before = input_len,
            after = merged.len(),
            "Merged small chunks"
        );
    }
    merged
}
