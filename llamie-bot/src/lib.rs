//! # llamie-bot
//!
//! Relay bot application: configuration, CLI, admission policy, command and relay handlers,
//! component assembly and [`run_bot`]. Transport lives in llamie-telegram; chat history in
//! context-store; inference behind [`llm_client::LlmClient`].

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod mention;
mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BotConfig, RelayConfig};
pub use handlers::{Command, CommandHandler, RelayHandler};
pub use mention::{admit, is_mentioned, is_reply_to_bot, strip_mention, Admission};
pub use runner::run_bot;
