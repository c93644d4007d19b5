//! BotConfig: TelegramConfig + EnvLlmConfig + RelayConfig + log file. Use load() for env-based loading.

use anyhow::Result;
use llamie_telegram::TelegramConfig;
use llm_client::EnvLlmConfig;
use std::env;

use super::RelayConfig;

/// Full application config. Call validate() after load() to fail fast before init.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub llm: EnvLlmConfig,
    pub relay: RelayConfig,
    /// LOG_FILE
    pub log_file: String,
}

impl BotConfig {
    pub const DEFAULT_LOG_FILE: &'static str = "logs/llamie-bot.log";

    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let relay = RelayConfig::from_env()?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| Self::DEFAULT_LOG_FILE.to_string());
        Ok(Self {
            telegram,
            llm,
            relay,
            log_file,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.llm.validate()?;
        self.relay.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.telegram.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.telegram.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> &str {
        &self.log_file
    }
}
