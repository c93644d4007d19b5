//! [`LlmClient`] backed by openai-client; works with any OpenAI-compatible endpoint.

use async_trait::async_trait;
use prompt::ChatMessage;
use std::time::Duration;
use tracing::instrument;

use super::{chat_message_to_openai, InferenceError, LlmClient, LlmConfig};

/// Default model when none is configured (served by a local Ollama).
pub const DEFAULT_MODEL: &str = "gemma3n:e4b";

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Builds a client from any [`LlmConfig`] (endpoint, key, model, timeout).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_timeout(config.timeout())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, InferenceError> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>, _>>()?;
        self.client
            .chat_completion(&self.model, openai_messages)
            .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
