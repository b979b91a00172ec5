//! Embedding providers.

use crate::types::{AppError, Result};
use crate::utils::config::EmbeddingConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Turns text into fixed-dimension vectors.
///
/// Implementations must preserve input order in [`embed_many`] and return
/// vectors of exactly [`dimensions`] length. Query-time and index-time
/// embeddings must come from the same provider and model for distances to
/// mean anything; the chunk store records the model name for that reason.
///
/// [`embed_many`]: EmbeddingProvider::embed_many
/// [`dimensions`]: EmbeddingProvider::dimensions
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, preserving input order.
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Output dimensionality of every vector this provider returns.
    fn dimensions(&self) -> usize;

    /// Model identifier recorded alongside stored vectors.
    fn model_name(&self) -> &str;
}

/// Create the embedding provider named by the configuration.
pub fn create_embedding_provider(
    config: &EmbeddingConfig,
) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(OpenAiEmbeddings::new(config)?)),
        other => Err(AppError::Config(format!(
            "Unknown embedding provider: {}",
            other
        ))),
    }
}

// ============= OpenAI-compatible provider =============

/// Embeddings from an OpenAI-compatible `/embeddings` endpoint.
///
/// The `api_base` setting makes any compatible server usable, including
/// local inference hosts.
#[derive(Debug)]
pub struct OpenAiEmbeddings {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
    batch_size: usize,
}

impl OpenAiEmbeddings {
    /// Build a client from embedding settings, resolving the API key from
    /// the configured environment variable.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        let endpoint = format!("{}/embeddings", config.api_base.trim_end_matches('/'));

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            model: config.model.clone(),
            dimensions: config.dimensions,
            batch_size: config.batch_size,
        })
    }

    async fn request_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: inputs,
            dimensions: self.dimensions,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Embedding request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(AppError::Embedding(format!(
                "Embedding request failed ({}): {}",
                status, body
            )));
        }

        let mut parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            AppError::Embedding(format!("Failed to parse embedding response: {}", e))
        })?;

        // The API may return entries out of order; index restores input order.
        parsed.data.sort_by_key(|entry| entry.index);

        if parsed.data.len() != inputs.len() {
            return Err(AppError::Embedding(format!(
                "Provider returned {} embeddings for {} inputs",
                parsed.data.len(),
                inputs.len()
            )));
        }
        for entry in &parsed.data {
            if entry.embedding.len() != self.dimensions {
                return Err(AppError::Embedding(format!(
                    "Provider returned a {}-dimension vector, expected {}",
                    entry.embedding.len(),
                    self.dimensions
                )));
            }
        }

        Ok(parsed
            .data
            .into_iter()
            .map(|entry| entry.embedding)
            .collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let inputs = [text.to_string()];
        let mut vectors = self.request_batch(&inputs).await?;
        vectors
            .pop()
            .ok_or_else(|| AppError::Embedding("Provider returned no embedding".to_string()))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            let mut batch_vectors = self.request_batch(batch).await?;
            vectors.append(&mut batch_vectors);
            debug!(
                embedded = vectors.len(),
                total = texts.len(),
                "Embedding progress"
            );
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
