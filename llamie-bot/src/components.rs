//! Component factory: builds the shared store, inference client and Bot adapter from config, and
//! assembles the handler chain. Kept apart from the runner so tests can inject mocks.

use context_store::ContextStore;
use handler_chain::HandlerChain;
use llamie_core::Bot as CoreBot;
use llamie_telegram::{SharedIdentity, TelegramBotAdapter};
use llm_client::{LlmClient, OpenAILlmClient};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::{BotConfig, RelayConfig};
use crate::handlers::{CommandHandler, RelayHandler};

/// Dependencies shared by the handlers.
#[derive(Clone)]
pub struct BotComponents {
    pub store: ContextStore,
    pub llm_client: Arc<dyn LlmClient>,
    pub bot: Arc<dyn CoreBot>,
    pub identity: SharedIdentity,
}

/// Builds BotComponents for the given teloxide Bot; the identity starts unresolved.
#[instrument(skip(config, teloxide_bot))]
pub fn build_bot_components(config: &BotConfig, teloxide_bot: &teloxide::Bot) -> BotComponents {
    let store = ContextStore::new(config.relay.system_prompt.clone(), config.relay.max_context);
    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(&config.llm));
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    info!(
        max_context = store.max_messages(),
        model = %llm_client.model(),
        "Components built"
    );
    BotComponents {
        store,
        llm_client,
        bot,
        identity: Arc::new(tokio::sync::RwLock::new(None)),
    }
}

/// Chain order: CommandHandler, then RelayHandler.
pub fn build_handler_chain(relay: &RelayConfig, components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            components.store.clone(),
            components.bot.clone(),
            components.identity.clone(),
            relay.greeting.clone(),
        )))
        .add_handler(Arc::new(RelayHandler::new(
            components.store.clone(),
            components.llm_client.clone(),
            components.bot.clone(),
            components.identity.clone(),
            relay.mention_token.clone(),
        )))
}
