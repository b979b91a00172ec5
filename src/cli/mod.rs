//! CLI module for vade
//!
//! Provides command-line interface parsing and handling for the vade binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod embed;
pub mod ingest;
pub mod output;
pub mod query;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::types::Result;
use crate::utils::config::Config;
use output::Output;

/// vade - handbook retrieval assistant
///
/// Fetches handbook pages, chunks them into sections, embeds the chunks
/// into a vector index, and answers questions grounded in the retrieved text.
#[derive(Parser, Debug)]
#[command(
    name = "vade",
    version,
    about = "vade - handbook retrieval assistant",
    long_about = "Fetches handbook pages, chunks them into searchable sections, embeds the\n\
                  chunks into a vector index, and answers questions grounded in the text it\n\
                  retrieves.\n\n\
                  Run 'ingest' then 'embed' to build the index, then 'search' or 'ask'.",
    after_help = "EXAMPLES:\n    \
                  vade ingest                    # Fetch and chunk the configured pages\n    \
                  vade embed                     # Embed chunks and build the index\n    \
                  vade search \"license renewal\"  # One-shot similarity search\n    \
                  vade ask                       # Interactive question answering\n    \
                  vade config --validate         # Check vade.toml and API keys"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "vade.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch configured pages and chunk them into sections
    ///
    /// Downloads every URL in [sources].urls, splits each page into
    /// per-section chunks, merges fragments that are too small to stand
    /// alone, and writes the result to the chunks file.
    Ingest,

    /// Embed stored chunks and build the vector index
    ///
    /// Reads the chunks file produced by 'ingest', embeds every chunk
    /// with the configured provider, and writes the chunk store and
    /// vector index used by 'search' and 'ask'.
    Embed,

    /// Search the index for sections similar to a query
    Search {
        /// Query text (omit for an interactive session)
        query: Option<String>,

        /// Number of results to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Ask a question answered from retrieved handbook sections
    Ask {
        /// Question text (omit for an interactive session)
        question: Option<String>,

        /// Number of sections to retrieve as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Do not print the retrieved sources
        #[arg(long)]
        no_sources: bool,
    },

    /// Show or validate the configuration
    Config {
        /// Validate the configuration file and API keys
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Handle the `config` subcommand
pub fn handle_config(config: &Config, path: &Path, validate: bool, output: &Output) -> Result<()> {
    if validate {
        config.validate()?;
        config.embedding.api_key()?;
        config.llm.api_key()?;
        output.success("Configuration is valid");
        return Ok(());
    }

    output.header("Configuration");
    if path.exists() {
        output.kv("file", &path.display().to_string());
    } else {
        output.kv(
            "file",
            &format!("{} (not found, using defaults)", path.display()),
        );
    }
    output.newline();
    output.body(&config.to_toml()?);
    Ok(())
}
