//! Inference configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::openai_llm::DEFAULT_MODEL;

/// Inference configuration for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// Inference config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    /// OPENAI_API_KEY; Ollama ignores it, so a placeholder is used when unset.
    pub openai_api_key: String,
    /// OPENAI_BASE_URL
    pub openai_base_url: String,
    /// MODEL
    pub llm_model: String,
    /// LLM_TIMEOUT_SECS
    pub llm_timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

impl EnvLlmConfig {
    pub const DEFAULT_API_KEY: &'static str = "ollama";
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434/v1";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Load from environment variables; every field has a default.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_API_KEY.to_string());
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("LLM_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => Self::DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_timeout_secs,
        })
    }

    /// Fails on a zero timeout or an empty endpoint/model.
    pub fn validate(&self) -> Result<()> {
        if self.llm_timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        if self.openai_base_url.trim().is_empty() {
            anyhow::bail!("OPENAI_BASE_URL must not be empty");
        }
        if self.llm_model.trim().is_empty() {
            anyhow::bail!("MODEL must not be empty");
        }
        Ok(())
    }
}
