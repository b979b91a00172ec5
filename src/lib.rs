//! # vade - handbook retrieval assistant
//!
//! Fetches handbook pages from the web, chunks them into per-section
//! passages, embeds the passages into a vector index, and answers questions
//! grounded in the retrieved text.
//!
//! ## Overview
//!
//! vade can be used in two ways:
//!
//! 1. **As a CLI** - Run the `vade` binary (`ingest`, `embed`, `search`, `ask`)
//! 2. **As a library** - Import the pipeline components into your own project
//!
//! ## Pipeline
//!
//! 1. **ingest** - fetch each configured page, parse the main content region,
//!    chunk it by section, and merge fragments that are too small to stand
//!    alone
//! 2. **embed** - embed every chunk with the configured provider and build
//!    the vector index
//! 3. **search / ask** - embed a query, rank chunks by distance, and either
//!    print the hits or feed them to an LLM as grounding context
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use vade::rag::{create_embedding_provider, Retriever};
//! use vade::rag::store::open_pair;
//! use vade::utils::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("vade.toml")?;
//!
//!     // Open the chunk store and vector index built by `vade embed`
//!     let (store, index) = open_pair(&config.storage, &config.embedding.model).await?;
//!     let embedder = create_embedding_provider(&config.embedding)?;
//!     let retriever = Retriever::new(store, index, embedder);
//!
//!     for hit in retriever.retrieve("license renewal", 3).await? {
//!         println!("{:.3}  {}", hit.similarity, hit.chunk.source_label());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - fetching, parsing, chunking, embedding, retrieval, synthesis
//! - [`llm`] - chat completion clients used for answer synthesis
//! - [`cli`] - argument parsing, output helpers, command handlers
//! - [`types`] - chunk and retrieval types, error handling
//! - [`utils`] - TOML configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line interface parsing and command handlers.
pub mod cli;
/// LLM chat completion clients and abstractions.
pub mod llm;
/// Retrieval Augmented Generation (RAG) pipeline components.
pub mod rag;
/// Core types (chunks, retrieval results, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use rag::{ChunkStore, Chunker, PageFetcher, Retriever, Synthesizer};
pub use types::{AppError, Chunk, Result, RetrievalResult};
pub use utils::config::Config;
