//! Bot configuration: Telegram connectivity, inference, relay behavior and logging.

mod bot_config;
mod relay;


pub use bot_config::BotConfig;
pub use relay::RelayConfig;
