//! TOML-based configuration for vade.
//!
//! Configuration lives in `vade.toml`. Every field has a default, so a
//! missing file yields a runnable configuration (with an empty source list).
//! Secrets are never stored in the file: provider sections name the
//! environment variable holding the API key (`api_key_env`), resolved when a
//! client is constructed. A `.env` file is honored via dotenvy.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Root configuration structure loaded from vade.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Pages to ingest.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Chunking thresholds.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding provider settings.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Language model settings for answer synthesis.
    #[serde(default)]
    pub llm: LlmConfig,

    /// On-disk artifact locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Retrieval settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

// ============= Sources Configuration =============

/// The set of handbook pages to ingest and how to fetch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Page URLs, fetched in order.
    #[serde(default)]
    pub urls: Vec<String>,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; vade/0.1)".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Chunking Configuration =============

/// Thresholds governing chunk boundaries and sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Soft cap on chunk size in words; checked before appending an element.
    #[serde(default = "default_max_section_words")]
    pub max_section_words: usize,

    /// Chunks below this word count are folded into their predecessor.
    #[serde(default = "default_min_chunk_words")]
    pub min_chunk_words: usize,

    /// Introductions below this word count are discarded.
    #[serde(default = "default_min_intro_words")]
    pub min_intro_words: usize,

    /// Section headings skipped entirely (site boilerplate).
    #[serde(default = "default_excluded_sections")]
    pub excluded_sections: Vec<String>,
}

fn default_max_section_words() -> usize {
    500
}

fn default_min_chunk_words() -> usize {
    50
}

fn default_min_intro_words() -> usize {
    20
}

fn default_excluded_sections() -> Vec<String> {
    vec!["Additional Formats".to_string()]
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_section_words: default_max_section_words(),
            min_chunk_words: default_min_chunk_words(),
            min_intro_words: default_min_intro_words(),
            excluded_sections: default_excluded_sections(),
        }
    }
}

// ============= Embedding Configuration =============

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name; currently `openai` (any OpenAI-compatible endpoint).
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Output dimensionality requested from the model.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Base URL of the API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable containing the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Texts per embedding request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_batch_size() -> usize {
    64
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_embedding_model(),
            dimensions: default_dimensions(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            batch_size: default_batch_size(),
        }
    }
}

impl EmbeddingConfig {
    /// Resolve the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            AppError::Config(format!(
                "Environment variable {} is not set",
                self.api_key_env
            ))
        })
    }
}

// ============= LLM Configuration =============

/// Language model settings for answer synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name; currently `openai` (any OpenAI-compatible endpoint).
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Chat model identifier.
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Base URL of the API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable containing the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in a generated answer.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    400
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_llm_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            AppError::Config(format!(
                "Environment variable {} is not set",
                self.api_key_env
            ))
        })
    }
}

// ============= Storage Configuration =============

/// Where pipeline artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding chunks, the chunk store, and the index.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the raw chunk sequence written by `ingest`.
    pub fn chunks_path(&self) -> PathBuf {
        self.data_dir.join("chunks.json")
    }

    /// Path of the chunk store half of the retrieval pair.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    /// Path of the vector index half of the retrieval pair.
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("index.bin")
    }
}

// ============= Retrieval Configuration =============

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

// ============= Loading =============

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. Also loads `.env` if present.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
            info!(path = %path.display(), "Loaded configuration");
            config
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_section_words == 0 {
            return Err(AppError::Config(
                "chunking.max_section_words must be > 0".to_string(),
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "embedding.dimensions must be > 0".to_string(),
            ));
        }
        if self.embedding.batch_size == 0 {
            return Err(AppError::Config(
                "embedding.batch_size must be > 0".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(AppError::Config("retrieval.top_k must be > 0".to_string()));
        }
        Ok(())
    }

    /// Render the resolved configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to render configuration: {}", e)))
    }
}
