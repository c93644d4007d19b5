//! Outbound side of the messaging collaborator.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in llamie-telegram.
//! Tests substitute a recording implementation.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Sends text back to a conversation. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a message to the chat the given message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
