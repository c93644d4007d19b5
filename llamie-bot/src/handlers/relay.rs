//! Relay handler: admitted messages go into the chat's context, the context goes to the model,
//! and the reply goes back to the chat.

use async_trait::async_trait;
use context_store::ContextStore;
use llamie_core::{error_notice, Bot as CoreBot, BotIdentity, Handler, HandlerResponse, Message, Result};
use llamie_telegram::SharedIdentity;
use llm_client::LlmClient;
use prompt::ChatMessage;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::mention::{admit, Admission};

/// Sent when the bot is mentioned with no text.
pub const EMPTY_MENTION_REPLY: &str = "👋 How can I help you?";
/// Prepended to every model reply sent to the chat.
pub const REPLY_PREFIX: &str = "🤖 ";

/// Logs the exact messages submitted to the model (role + full content) for debugging.
fn log_messages_submitted(messages: &[ChatMessage]) {
    info!(count = messages.len(), "submit_to_llm: messages submitted to LLM");
    for (i, m) in messages.iter().enumerate() {
        info!(index = i, role = %m.role, content = %m.content, "submit_to_llm message");
    }
}

/// Applies the admission policy and runs one exchange with the model per admitted message.
///
/// The turn lock of the conversation is held for the whole exchange. On inference failure the
/// user message stays in the context and the chat gets an error notice.
#[derive(Clone)]
pub struct RelayHandler {
    store: ContextStore,
    llm_client: Arc<dyn LlmClient>,
    bot: Arc<dyn CoreBot>,
    identity: SharedIdentity,
    mention_token: Option<String>,
}

impl RelayHandler {
    /// `mention_token` None falls back to `@<username>` once the identity is known.
    pub fn new(
        store: ContextStore,
        llm_client: Arc<dyn LlmClient>,
        bot: Arc<dyn CoreBot>,
        identity: SharedIdentity,
        mention_token: Option<String>,
    ) -> Self {
        Self {
            store,
            llm_client,
            bot,
            identity,
            mention_token,
        }
    }

    fn resolve_mention(&self, identity: Option<&BotIdentity>) -> Option<String> {
        self.mention_token
            .clone()
            .or_else(|| identity.and_then(BotIdentity::mention))
    }

    async fn relay(&self, message: &Message, question: &str) -> Result<HandlerResponse> {
        let chat_id = message.chat.id;
        let _turn = self.store.begin_turn(chat_id).await;

        self.store.append(chat_id, ChatMessage::user(question)).await;
        self.store.trim(chat_id).await;

        let messages = self.store.snapshot(chat_id).await;
        info!(
            chat_id,
            model = %self.llm_client.model(),
            message_count = messages.len(),
            question = %question,
            "Submitting to LLM"
        );
        log_messages_submitted(&messages);

        match self.llm_client.complete(messages).await {
            Ok(reply) => {
                self.store
                    .append(chat_id, ChatMessage::assistant(reply.clone()))
                    .await;
                self.store.trim(chat_id).await;
                self.bot
                    .reply_to(message, &format!("{}{}", REPLY_PREFIX, reply))
                    .await?;
                info!(chat_id, user_id = message.user.id, "LLM response sent");
                Ok(HandlerResponse::Reply(reply))
            }
            Err(e) => {
                error!(chat_id, error = %e, "Failed to get LLM response");
                self.bot.reply_to(message, &error_notice(&e)).await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let identity = self.identity.read().await.clone();
        let mention = self.resolve_mention(identity.as_ref());

        match admit(message, identity.as_ref(), mention.as_deref()) {
            Admission::Ignore => {
                info!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    "step: RelayHandler not addressed to bot, skip"
                );
                Ok(HandlerResponse::Continue)
            }
            Admission::Greet => {
                self.bot.reply_to(message, EMPTY_MENTION_REPLY).await?;
                Ok(HandlerResponse::Reply(EMPTY_MENTION_REPLY.to_string()))
            }
            Admission::Query(question) => self.relay(message, &question).await,
        }
    }
}
