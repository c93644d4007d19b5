//! Wraps teloxide::Bot and implements [`llamie_core::Bot`]. Tests substitute another Bot impl.

use async_trait::async_trait;
use llamie_core::{Bot as CoreBot, Chat, LlamieError, Result};
use teloxide::{prelude::*, types::ChatId};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements the core Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        debug!(chat_id = chat.id, text_len = text.len(), "sendMessage");
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| LlamieError::Bot(e.to_string()))?;
        Ok(())
    }
}
