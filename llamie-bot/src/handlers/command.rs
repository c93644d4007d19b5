//! `/start` and `/reset`. Other slash commands are dropped without a reply.

use async_trait::async_trait;
use context_store::ContextStore;
use llamie_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use llamie_telegram::SharedIdentity;
use std::sync::Arc;
use teloxide::utils::command::BotCommands;
use tracing::{info, instrument};

pub const RESET_REPLY: &str = "🔄 Context reset! Ready for a fresh start.";

/// Commands understood by the bot; also registered as the Telegram command menu.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start a conversation")]
    Start,
    #[command(description = "clear this chat's context")]
    Reset,
}

/// Handles slash commands; lets every other message through to the relay.
#[derive(Clone)]
pub struct CommandHandler {
    store: ContextStore,
    bot: Arc<dyn CoreBot>,
    identity: SharedIdentity,
    greeting: String,
}

impl CommandHandler {
    pub fn new(
        store: ContextStore,
        bot: Arc<dyn CoreBot>,
        identity: SharedIdentity,
        greeting: String,
    ) -> Self {
        Self {
            store,
            bot,
            identity,
            greeting,
        }
    }

    async fn bot_username(&self) -> String {
        self.identity
            .read()
            .await
            .as_ref()
            .and_then(|me| me.username.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if !text.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        let chat_id = message.chat.id;
        let username = self.bot_username().await;
        match Command::parse(text, &username) {
            Ok(Command::Start) => {
                self.store.ensure_initialized(chat_id).await;
                info!(chat_id, user_id = message.user.id, "step: /start, context initialized");
                self.bot.reply_to(message, &self.greeting).await?;
                Ok(HandlerResponse::Reply(self.greeting.clone()))
            }
            Ok(Command::Reset) => {
                // Waits for an in-flight exchange so its reply does not land after the reset.
                let _turn = self.store.begin_turn(chat_id).await;
                self.store.reset(chat_id).await;
                info!(chat_id, user_id = message.user.id, "step: /reset, context cleared");
                self.bot.reply_to(message, RESET_REPLY).await?;
                Ok(HandlerResponse::Reply(RESET_REPLY.to_string()))
            }
            Err(e) => {
                info!(chat_id, command = %text, error = %e, "Unknown command dropped");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
