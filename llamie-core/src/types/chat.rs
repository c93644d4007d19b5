//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat (group or private) identity. `id` is the conversation key for context storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    pub fn new(id: i64, chat_type: impl Into<String>) -> Self {
        Self {
            id,
            chat_type: chat_type.into(),
        }
    }
}
