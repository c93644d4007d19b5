//! Error types for the bot core.

use thiserror::Error;

/// Top-level error: outbound transport failures and tracing setup.
#[derive(Error, Debug)]
pub enum LlamieError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Tracing error: {0}")]
    Tracing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`LlamieError`].
pub type Result<T> = std::result::Result<T, LlamieError>;

/// Marker placed before the raw error text in user-visible error messages.
pub const ERROR_NOTICE_PREFIX: &str = "⚠️ Error: ";

/// User-visible chat text for any failure during message handling.
pub fn error_notice(err: &dyn std::fmt::Display) -> String {
    format!("{}{}", ERROR_NOTICE_PREFIX, err)
}
