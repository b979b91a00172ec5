//! Mock implementations for testing.
//!
//! This module provides a deterministic embedding provider and a mock LLM
//! client that can be used across different test files without duplication.

use async_trait::async_trait;
use vade::llm::LlmClient;
use vade::rag::EmbeddingProvider;
use vade::types::{AppError, Result};

/// The fixed vocabulary [`MockEmbedder`] projects text onto.
pub const MOCK_VOCABULARY: [&str; 8] = [
    "license",
    "renewal",
    "fee",
    "permit",
    "vehicle",
    "registration",
    "insurance",
    "appointment",
];

/// Deterministic embedding provider for tests.
///
/// Embeds text as L2-normalized per-word counts over [`MOCK_VOCABULARY`], so
/// texts sharing vocabulary land near each other under L2 distance without a
/// real model or any network access.
///
/// # Examples
///
/// ```ignore
/// let embedder = MockEmbedder::new();
/// let v = embedder.embed("license renewal fee").await?;
/// assert_eq!(v.len(), embedder.dimensions());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockEmbedder;

impl MockEmbedder {
    /// Create a new mock embedder.
    pub fn new() -> Self {
        Self
    }

    fn project(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .collect();

        let mut counts: Vec<f32> = MOCK_VOCABULARY
            .iter()
            .map(|term| words.iter().filter(|w| *w == term).count() as f32)
            .collect();

        // Normalize so chunk length does not dominate the distance.
        let norm = counts.iter().map(|c| c * c).sum::<f32>().sqrt();
        if norm > 0.0 {
            for c in &mut counts {
                *c /= norm;
            }
        }
        counts
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.project(text))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.project(t)).collect())
    }

    fn dimensions(&self) -> usize {
        MOCK_VOCABULARY.len()
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}

/// Mock LLM client for testing with a configurable response.
///
/// The client can return a fixed answer or simulate failures, so tests that
/// depend on answer synthesis run without real API calls.
#[derive(Clone, Debug)]
pub struct MockLlm {
    response: String,
    should_fail: bool,
}

impl MockLlm {
    /// Create a mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        if self.should_fail {
            return Err(AppError::Llm("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedder_is_deterministic() {
        let embedder = MockEmbedder::new();
        let a = embedder.embed("license renewal").await.unwrap();
        let b = embedder.embed("license renewal").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), embedder.dimensions());
    }

    #[tokio::test]
    async fn test_mock_embedder_counts_vocabulary() {
        let embedder = MockEmbedder::new();
        let v = embedder.embed("license license fee").await.unwrap();
        // "license" appears twice, "fee" once, "renewal" never
        assert!(v[0] > v[2]);
        assert!(v[2] > 0.0);
        assert_eq!(v[1], 0.0);

        let norm: f32 = v.iter().map(|c| c * c).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_mock_embedder_empty_text_is_zero_vector() {
        let embedder = MockEmbedder::new();
        let v = embedder.embed("nothing from the vocabulary").await.unwrap();
        assert!(v.iter().all(|c| *c == 0.0));
    }

    #[tokio::test]
    async fn test_mock_llm_returns_response() {
        let client = MockLlm::new("test response");
        let result = client.generate_with_system("system", "prompt").await;
        assert_eq!(result.unwrap(), "test response");
    }

    #[tokio::test]
    async fn test_mock_llm_failing() {
        let client = MockLlm::failing();
        let result = client.generate_with_system("system", "prompt").await;
        assert!(result.is_err());
    }
}
