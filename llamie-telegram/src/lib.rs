//! # llamie-telegram
//!
//! Telegram transport: adapters from teloxide types, [`llamie_core::Bot`] implementation, minimal
//! config, and the long-polling runner that feeds the handler chain. No context or inference
//! logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{dispatch, fetch_identity, run_repl, SharedIdentity};
