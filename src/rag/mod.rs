//! The handbook ingestion and retrieval pipeline.
//!
//! Ingestion runs in stages: pages are fetched ([`fetch`]) and parsed into an
//! ordered element stream ([`parse`]), split into section-aligned chunks
//! ([`chunker`]), and small chunks are folded into their predecessors
//! ([`merger`]). The embed stage turns chunk contents into vectors
//! ([`embeddings`]) and writes the chunk store and vector index as a matched
//! pair ([`store`]). Queries search that pair ([`retriever`]) and synthesize
//! an answer from the retrieved context ([`answer`]).

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod fetch;
pub mod merger;
pub mod parse;
pub mod retriever;
pub mod store;

pub use answer::Synthesizer;
pub use chunker::Chunker;
pub use embeddings::{create_embedding_provider, EmbeddingProvider};
pub use fetch::PageFetcher;
pub use merger::merge_small_chunks;
pub use parse::parse_document;
pub use retriever::Retriever;
pub use store::ChunkStore;
