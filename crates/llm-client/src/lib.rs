//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the seam between the relay handler and the inference
//! service) and an OpenAI-compatible implementation. Results are explicit:
//! `Ok(reply)` or an [`InferenceError`] describing the failure.

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_client::InferenceError;
pub use openai_llm::OpenAILlmClient;

/// Inference collaborator: turns an ordered message sequence into one assistant reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the assistant reply for `messages` (system/user/assistant, in order). The caller
    /// supplies the system directive; implementations add nothing.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, InferenceError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, InferenceError> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
