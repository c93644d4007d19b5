//! # llamie-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], [`Message`], [`BotIdentity`],
//! error types and tracing initialization. Transport-agnostic; used by llamie-telegram,
//! handler-chain and llamie-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{error_notice, LlamieError, Result, ERROR_NOTICE_PREFIX};
pub use logger::init_tracing;
pub use types::{
    BotIdentity, Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User,
};
