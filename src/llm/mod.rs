//! Language model clients for answer synthesis.

pub mod client;
pub mod openai;

pub use client::{create_client, LlmClient};
pub use openai::OpenAiClient;
