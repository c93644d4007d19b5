//! Relay behavior: mention token, context size, system directive and greeting.

use anyhow::{Context, Result};
use std::env;

/// Relay settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// BOT_MENTION; None means `@<username>` from getMe.
    pub mention_token: Option<String>,
    /// MAX_CONTEXT, counting the system message.
    pub max_context: usize,
    /// LLM_SYSTEM_PROMPT or SYSTEM_PROMPT
    pub system_prompt: String,
    /// BOT_GREETING, sent on /start.
    pub greeting: String,
}

impl RelayConfig {
    pub const DEFAULT_MAX_CONTEXT: usize = 10;
    pub const DEFAULT_GREETING: &'static str =
        "👋 Hello! I am Llamie Bot. How can I assist you today?";

    pub fn from_env() -> Result<Self> {
        let mention_token = env::var("BOT_MENTION")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let max_context = match env::var("MAX_CONTEXT") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("MAX_CONTEXT is not a number: {}", s))?,
            Err(_) => Self::DEFAULT_MAX_CONTEXT,
        };
        let system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| prompt::DEFAULT_SYSTEM_MESSAGE.to_string());
        let greeting = env::var("BOT_GREETING")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_GREETING.to_string());

        Ok(Self {
            mention_token,
            max_context,
            system_prompt,
            greeting,
        })
    }

    /// MAX_CONTEXT must leave room for the system message and at least one turn message.
    pub fn validate(&self) -> Result<()> {
        if self.max_context < 2 {
            anyhow::bail!(
                "MAX_CONTEXT must be at least 2 (system message plus one message), got {}",
                self.max_context
            );
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            mention_token: None,
            max_context: Self::DEFAULT_MAX_CONTEXT,
            system_prompt: prompt::DEFAULT_SYSTEM_MESSAGE.to_string(),
            greeting: Self::DEFAULT_GREETING.to_string(),
        }
    }
}
