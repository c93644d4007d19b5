use anyhow::Result;
use llamie_core::init_tracing;
use llamie_telegram::{fetch_identity, run_repl};
use openai_client::mask_token;
use teloxide::utils::command::BotCommands;
use tracing::{info, instrument, warn};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::handlers::Command;

/// Main entry: validate config, init logging, build components and the handler chain, resolve the
/// bot identity, then run the polling REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        base_url = %config.llm.openai_base_url,
        api_key = %mask_token(&config.llm.openai_api_key),
        model = %config.llm.llm_model,
        timeout_secs = config.llm.llm_timeout_secs,
        max_context = config.relay.max_context,
        mention = ?config.relay.mention_token,
        "Initializing bot"
    );

    let teloxide_bot = config.telegram.build_bot()?;
    let components = build_bot_components(&config, &teloxide_bot);
    let handler_chain = build_handler_chain(&config.relay, &components);

    if let Err(e) = fetch_identity(&teloxide_bot, &components.identity).await {
        warn!(error = %e, "Failed to resolve bot identity at startup; retrying when polling starts");
    }

    info!("Bot started successfully");

    run_repl(
        teloxide_bot,
        handler_chain,
        components.identity.clone(),
        Command::bot_commands(),
    )
    .await
}
