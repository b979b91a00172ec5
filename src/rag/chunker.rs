//! Section-aligned chunking of parsed documents.
//!
//! Every chunk carries the section heading it was cut from, so a retrieved
//! chunk can always be cited as "page > section". Chunk ids come from a
//! single counter threaded through the whole run, which makes ids unique and
//! ordered by emission across all documents rather than within one.

use crate::types::{count_words, Chunk, DocumentElement, ParsedDocument, INTRO_SECTION};
use crate::utils::config::ChunkingConfig;
use tracing::debug;

/// Splits parsed documents into section-aligned chunks.
pub struct Chunker {
    max_section_words: usize,
    min_intro_words: usize,
    excluded_sections: Vec<String>,
}

impl Chunker {
    /// Build a chunker from chunking settings.
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            max_section_words: config.max_section_words,
            min_intro_words: config.min_intro_words,
            excluded_sections: config.excluded_sections.clone(),
        }
    }

    /// Chunk one document into its introduction and per-section chunks.
    ///
    /// `next_id` is the emission counter shared across every document in a
    /// run. It starts at 0 and is incremented before each emission, so the
    /// first chunk of a run gets id 1 and ids reflect global emission order.
    pub fn chunk_document(
        &self,
        doc: &ParsedDocument,
        source_url: &str,
        next_id: &mut u64,
    ) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        // Introduction: body text before the first section heading. Emitted
        // as a single chunk, and only when it is substantial.
        let intro_end = doc
            .elements
            .iter()
            .position(|element| element.is_section_heading())
            .unwrap_or(doc.elements.len());

        let intro: Vec<&str> = doc.elements[..intro_end]
            .iter()
            .filter(|element| element.is_body())
            .map(|element| element.text.as_str())
            .collect();

        if !intro.is_empty() {
            let content = intro.join("\n");
            let word_count = count_words(&content);
            if word_count >= self.min_intro_words {
                chunks.push(emit_chunk(
                    source_url,
                    &doc.page_title,
                    INTRO_SECTION,
                    content,
                    word_count,
                    next_id,
                ));
            }
        }

        // Sections: each level-2 heading owns the body elements that follow
        // it, up to the next level-2 heading or the end of the document.
        let mut idx = intro_end;
        while idx < doc.elements.len() {
            let section_title = doc.elements[idx].text.clone();
            idx += 1;

            let body_start = idx;
            while idx < doc.elements.len() && !doc.elements[idx].is_section_heading() {
                idx += 1;
            }

            if self.excluded_sections.contains(&section_title) {
                debug!(section = %section_title, "Skipping excluded section");
                continue;
            }

            self.chunk_section(
                &doc.elements[body_start..idx],
                source_url,
                &doc.page_title,
                &section_title,
                next_id,
                &mut chunks,
            );
        }

        debug!(
            page_title = %doc.page_title,
            chunks = chunks.len(),
            "Chunked document"
        );
        chunks
    }

    /// Accumulate one section's body under a soft word cap.
    ///
    /// The cap is checked against the would-be total before appending, so an
    /// element is never split internally. A single element larger than the
    /// cap becomes a chunk on its own.
    fn chunk_section(
        &self,
        body: &[DocumentElement],
        source_url: &str,
        page_title: &str,
        section_title: &str,
        next_id: &mut u64,
        chunks: &mut Vec<Chunk>,
    ) {
        let mut buffer: Vec<&str> = Vec::new();
        let mut buffered_words = 0;

        for element in body.iter().filter(|element| element.is_body()) {
            let element_words = count_words(&element.text);

            if buffered_words + element_words > self.max_section_words && !buffer.is_empty() {
                chunks.push(emit_chunk(
                    source_url,
                    page_title,
                    section_title,
                    buffer.join("\n"),
                    buffered_words,
                    next_id,
                ));
                buffer.clear();
                buffered_words = 0;
            }

            buffer.push(&element.text);
            buffered_words += element_words;
        }

        if !buffer.is_empty() {
            chunks.push(emit_chunk(
                source_url,
                page_title,
                section_title,
                buffer.join("\n"),
                buffered_words,
                next_id,
            ));
        }
    }
}

fn emit_chunk(
    source_url: &str,
    page_title: &str,
    section_title: &str,
    content: String,
    word_count: usize,
    next_id: &mut u64,
) -> Chunk {
    *next_id += 1;
    Chunk {
        id: *next_id,
        source_url: source_url.to_string(),
        page_title: page_title.to_string(),
        section_title: section_title.to_string(),
        content,
        word_count,
    }
}
