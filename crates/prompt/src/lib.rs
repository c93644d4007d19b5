//! # Prompt
//!
//! Chat message model shared by the context store and the inference client.
//!
//! A [`ChatMessage`] is a role plus text content; roles are one-to-one with the OpenAI Chat
//! Completions `role` values and can only be built from the three known names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    /// System directive (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a role name other than `system`, `user` or `assistant`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message role: {0:?}")]
pub struct ParseRoleError(pub String);

impl FromStr for MessageRole {
    type Err = ParseRoleError;

    /// Exact, lowercase match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A single chat message, one element of the OpenAI `messages` array. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Builds a message from a role name; fails on unknown roles.
    pub fn parse(role: &str, content: impl Into<String>) -> Result<Self, ParseRoleError> {
        Ok(Self::new(role.parse()?, content))
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn is_system(&self) -> bool {
        self.role == MessageRole::System
    }
}

/// Default system directive when none is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are Llamie, a friendly assistant in a Telegram chat. \
Answer concisely in plain text without Markdown, since replies are sent as-is.";
