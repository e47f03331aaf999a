use async_trait::async_trait;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::Prompt,
    providers::gemini::{self, completion::CompletionModel},
};

use crate::error::GenerationError;

/// A text completion backend: prompt in, generated text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Gemini text completion. Every call is a fresh request without retries.
pub struct GeminiGenerator {
    agent: Agent<CompletionModel>,
}

impl GeminiGenerator {
    pub fn new(api_key: &str, model: &str) -> Self {
        let client = gemini::Client::new(api_key);

        // Personality prompts are embedded in each prompt, so the agent has no preamble.
        let agent = client.agent(model).build();

        Self { agent }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(prompt_len = prompt.len(), "Sending prompt to Gemini");

        let response = self
            .agent
            .prompt(prompt)
            .await
            .map_err(|e| GenerationError(e.to_string()))?;

        Ok(response.trim().to_string())
    }
}
