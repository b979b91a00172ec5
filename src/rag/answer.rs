//! Answer synthesis from retrieved handbook context.

use crate::llm::LlmClient;
use crate::types::{Result, RetrievalResult};
use tracing::debug;

const SYSTEM_PROMPT: &str = "\
You are a helpful assistant answering questions from an official handbook.

Your job is to answer using ONLY the provided context sections from the handbook.

Rules:
- Use ONLY information from the provided context
- Cite which source you are using when possible
- If the answer is not in the context, say \"I don't have that information in the handbook.\"
- Be concise but complete
- Use a friendly, helpful tone";

/// Generates grounded answers from retrieved chunks.
pub struct Synthesizer {
    client: Box<dyn LlmClient>,
}

impl Synthesizer {
    /// Build a synthesizer over a language model client.
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Model identifier of the underlying client.
    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Answer a question from the retrieved context, best sources first.
    ///
    /// The model only sees the provided chunks, so an answer outside them
    /// should come back as the handbook-doesn't-say response. Failures here
    /// are recoverable: the retrieval results remain valid and the caller
    /// can report the error and carry on.
    pub async fn answer(&self, question: &str, context: &[RetrievalResult]) -> Result<String> {
        let prompt = build_prompt(question, context);
        debug!(sources = context.len(), "Synthesizing answer");
        self.client
            .generate_with_system(SYSTEM_PROMPT, &prompt)
            .await
    }
}

fn build_prompt(question: &str, context: &[RetrievalResult]) -> String {
    let blocks: Vec<String> = context
        .iter()
        .map(|result| {
            format!(
                "Source {} ({}):\n{}",
                result.rank,
                result.chunk.source_label(),
                result.chunk.content
            )
        })
        .collect();

    format!(
        "Context from the handbook:\n\n{}\n\n---\n\nQuestion: {}\n\nPlease answer based on the context above.",
        blocks.join("\n\n"),
        question
    )
}
