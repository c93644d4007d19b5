//! Long-polling runner: resolves the bot identity, registers the command menu, then converts each
//! teloxide message to a core Message and runs the handler chain on its own task.

use std::sync::Arc;

use handler_chain::HandlerChain;
use llamie_core::{error_notice, Bot as CoreBot, BotIdentity, Message as CoreMessage, ToCoreMessage};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;
use super::bot_adapter::TelegramBotAdapter;

/// Bot identity shared with handlers; None until `getMe` succeeds.
pub type SharedIdentity = Arc<tokio::sync::RwLock<Option<BotIdentity>>>;

/// Calls `getMe` and stores the result in `identity`. Errors are returned to the caller.
#[instrument(skip(bot, identity))]
pub async fn fetch_identity(bot: &teloxide::Bot, identity: &SharedIdentity) -> anyhow::Result<BotIdentity> {
    let me = bot.get_me().await?;
    let resolved = BotIdentity::new(me.user.id.0 as i64, me.user.username.clone());
    info!(
        bot_id = resolved.id,
        username = ?resolved.username,
        "Bot identity resolved"
    );
    *identity.write().await = Some(resolved.clone());
    Ok(resolved)
}

/// Runs the chain for one message on its own task and reports any failure to the chat.
///
/// Both an error returned by the chain and a panic inside it are logged and answered with
/// [`error_notice`]. A failure to send that notice is only logged.
pub async fn dispatch(chain: HandlerChain, bot: &dyn CoreBot, message: CoreMessage) {
    let chat_id = message.chat.id;
    let task_message = message.clone();
    let outcome = tokio::spawn(async move { chain.handle(&task_message).await }).await;

    let notice = match outcome {
        Ok(Ok(_)) => return,
        Ok(Err(e)) => {
            error!(error = %e, chat_id, "Handler chain failed");
            error_notice(&e)
        }
        Err(e) => {
            error!(error = %e, chat_id, "Handler chain panicked");
            error_notice(&e)
        }
    };

    if let Err(send_err) = bot.reply_to(&message, &notice).await {
        error!(error = %send_err, chat_id, "Failed to send error notice");
    }
}

/// Starts polling with the given teloxide Bot and HandlerChain.
///
/// `identity` should already be resolved (see [`fetch_identity`]); if it is not, one more attempt
/// is made here and a failure only disables reply/mention detection until restart. `commands` is
/// registered as the bot's command menu (best-effort). Each message goes through [`dispatch`].
#[instrument(skip(bot, handler_chain, identity, commands))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    identity: SharedIdentity,
    commands: Vec<BotCommand>,
) -> anyhow::Result<()> {
    if identity.read().await.is_none() {
        if let Err(e) = fetch_identity(&bot, &identity).await {
            warn!(error = %e, "getMe failed; reply-to-bot detection disabled");
        }
    }

    if !commands.is_empty() {
        if let Err(e) = bot.set_my_commands(commands).await {
            warn!(error = %e, "Failed to register command menu");
        }
    }

    info!("Polling started");
    let chain = handler_chain;
    teloxide::repl(bot, move |bot: teloxide::Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            if msg.text().is_some() {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_content = %core_msg.content,
                    "Received message"
                );
            } else {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Received non-text message"
                );
            }

            // Run the chain on its own task so polling is never blocked by a slow model.
            let adapter = TelegramBotAdapter::new(bot);
            tokio::spawn(async move { dispatch(chain, &adapter, core_msg).await });

            respond(())
        }
    })
    .await;

    Ok(())
}
