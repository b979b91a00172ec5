//! Core types shared across the pipeline: parsed document elements, chunks,
//! retrieval results, and the application error type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel page title for documents without a recognizable top-level heading.
pub const UNTITLED_PAGE: &str = "Untitled";

/// Sentinel section title for content preceding the first section heading.
pub const INTRO_SECTION: &str = "Introduction";

/// Count whitespace-delimited words in a text.
///
/// This is the single definition of "word count" used everywhere: chunk
/// sizing, the merge threshold, and the `word_count` field invariant.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

// ============= Document Types =============

/// The kind of a structural element extracted from a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A heading with its level (2 marks a section boundary).
    Heading {
        /// Heading level, e.g. 2 for `<h2>`.
        level: u8,
    },
    /// A paragraph of body text.
    Paragraph,
    /// A bulleted or numbered list, flattened to text.
    List,
}

/// One ordered, typed node from a parsed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentElement {
    /// Structural kind of the element.
    pub kind: ElementKind,
    /// Whitespace-normalized text content.
    pub text: String,
}

impl DocumentElement {
    /// Create a heading element.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Heading { level },
            text: text.into(),
        }
    }

    /// Create a paragraph element.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Paragraph,
            text: text.into(),
        }
    }

    /// Create a list element.
    pub fn list(text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::List,
            text: text.into(),
        }
    }

    /// True for a level-2 heading, the section boundary marker.
    pub fn is_section_heading(&self) -> bool {
        matches!(self.kind, ElementKind::Heading { level: 2 })
    }

    /// True for body elements whose text goes into chunks.
    pub fn is_body(&self) -> bool {
        matches!(self.kind, ElementKind::Paragraph | ElementKind::List)
    }
}

/// A parsed page: its title plus the ordered elements of its content region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Page title from the top-level heading, or [`UNTITLED_PAGE`].
    pub page_title: String,
    /// Structural elements in document order.
    pub elements: Vec<DocumentElement>,
}

// ============= Chunk Types =============

/// The atomic retrievable unit: a bounded piece of page text plus metadata.
///
/// Invariant: `word_count == count_words(&content)` at all times, including
/// after merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique id, assigned in global emission order starting at 1.
    pub id: u64,
    /// URL of the originating page.
    pub source_url: String,
    /// Title of the originating page.
    pub page_title: String,
    /// Heading the chunk was collected under, or [`INTRO_SECTION`].
    pub section_title: String,
    /// Newline-joined text of the constituent elements.
    pub content: String,
    /// Whitespace-delimited word count of `content`.
    pub word_count: usize,
}

impl Chunk {
    /// Human-readable source label, `page title > section title`.
    pub fn source_label(&self) -> String {
        format!("{} > {}", self.page_title, self.section_title)
    }
}

// ============= Retrieval Types =============

/// One ranked retrieval hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// 1-based rank in the result sequence.
    pub rank: usize,
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Raw squared L2 distance between query and chunk embeddings.
    pub distance: f32,
    /// `1 / (1 + distance)`, in (0, 1]. Display convenience, not a
    /// probability.
    pub similarity: f32,
}

/// Timestamp type used in persisted artifacts.
pub type Timestamp = DateTime<Utc>;

// ============= Error Types =============

/// Application-level error covering every pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration missing, malformed, or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A page body could not be parsed into document elements.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The embedding provider failed.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The language model failed.
    #[error("LLM error: {0}")]
    Llm(String),

    /// The chunk store could not be read or written.
    #[error("Store error: {0}")]
    Store(String),

    /// The chunk store and vector index disagree; persisted artifacts are
    /// corrupt or mismatched.
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Error from the vector index engine.
    #[error("Index error: {0}")]
    Index(#[from] vade_vector::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
