//! Client abstraction over language model providers.

use crate::types::{AppError, Result};
use crate::utils::config::LlmConfig;
use async_trait::async_trait;

/// Generic language model client.
///
/// Providers implement this trait so the synthesizer can swap between them
/// without changing application code.
#[async_trait]
pub trait LlmClient: Send + Sync + std::fmt::Debug {
    /// Generate a completion from a system prompt plus a user prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Model name/identifier.
    fn model_name(&self) -> &str;
}

/// Create the language model client named by the configuration.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(crate::llm::openai::OpenAiClient::new(config)?)),
        other => Err(AppError::Config(format!(
            "Unknown LLM provider: {}",
            other
        ))),
    }
}
