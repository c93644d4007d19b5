//! # OpenAI-compatible chat client
//!
//! Thin wrapper around [async-openai] for non-streaming chat completion against any
//! OpenAI-compatible endpoint (OpenAI itself, or Ollama's `/v1` API). Every request is bounded by
//! a timeout, and failures come back as [`InferenceError`] instead of a panic or an opaque error.
//! API keys are only ever logged masked (see [`mask_token`]).

use std::sync::Arc;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use thiserror::Error;
use tracing::{info, warn};

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Failure of one inference call. The `Display` text is what users see after the warning marker.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("inference API error: {0}")]
    Api(String),

    #[error("inference response contained no choices")]
    EmptyResponse,

    #[error("invalid inference request: {0}")]
    InvalidRequest(String),
}

impl From<OpenAIError> for InferenceError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::InvalidArgument(msg) => InferenceError::InvalidRequest(msg),
            other => InferenceError::Api(other.to_string()),
        }
    }
}

/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// Tokens of 11 chars or fewer become "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Chat client for one endpoint. Cheap to clone.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    base_url: String,
    masked_key: String,
    timeout: Duration,
}

impl OpenAIClient {
    /// Builds a client for `base_url` (e.g. `http://localhost:11434/v1`).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            base_url,
            masked_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// A missing content field on the choice yields an empty string; no choices at all is
    /// [`InferenceError::EmptyResponse`].
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, InferenceError> {
        info!(
            model = %model,
            base_url = %self.base_url,
            message_count = messages.len(),
            api_key = %self.masked_key,
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = match tokio::time::timeout(self.timeout, self.client.chat().create(request)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "chat_completion timed out");
                return Err(InferenceError::Timeout(self.timeout));
            }
        };

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(InferenceError::EmptyResponse)?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
