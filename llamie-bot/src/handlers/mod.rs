//! Chain handlers: commands first, then the relay.

mod command;
mod relay;

pub use command::{Command, CommandHandler, RESET_REPLY};
pub use relay::{RelayHandler, EMPTY_MENTION_REPLY, REPLY_PREFIX};
