//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One inbound message: sender, chat, text, and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for non-text updates.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// Author of the replied-to message; compared with the bot identity for reply-to-bot detection.
    pub reply_to_user_id: Option<i64>,
}

impl Message {
    /// Plain text message with no reply context.
    pub fn text(id: impl Into<String>, user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            created_at: Utc::now(),
            reply_to_message_id: None,
            reply_to_user_id: None,
        }
    }

    /// Sets the reply context (replied-to message id and its author).
    pub fn replying_to(mut self, message_id: impl Into<String>, author_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id.into());
        self.reply_to_user_id = Some(author_id);
        self
    }
}
