//! Identity of the running bot, resolved once at startup (Telegram `getMe`).

use serde::{Deserialize, Serialize};

/// The bot's own account. Used for reply-to-bot detection and the default mention token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    pub username: Option<String>,
}

impl BotIdentity {
    pub fn new(id: i64, username: Option<String>) -> Self {
        Self { id, username }
    }

    /// `@username`, or None when the account has no username.
    pub fn mention(&self) -> Option<String> {
        self.username.as_ref().map(|u| format!("@{}", u))
    }

    /// True if `user_id` is this bot's account.
    pub fn is_self(&self, user_id: i64) -> bool {
        self.id == user_id
    }
}
