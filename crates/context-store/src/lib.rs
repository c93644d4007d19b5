//! # Context store
//!
//! In-process conversation history for the relay bot. Each conversation (chat id) owns an ordered
//! sequence of [`ChatMessage`]s whose first element is the deployment's system directive.
//!
//! ## Invariants
//!
//! - A non-empty sequence starts with a `system` message; trimming never evicts it.
//! - After [`ContextStore::trim`], the sequence holds at most `max_messages` entries (system
//!   message included): the system message plus the most recent non-system messages.
//! - Insertion order is kept; nothing is reordered or deduplicated.
//!
//! Old turns are dropped silently, without summarization.
//!
//! ## Concurrency
//!
//! Every operation is atomic for one conversation. A whole exchange (append user message, call the
//! model, append the reply) is serialized per conversation with [`ContextStore::begin_turn`];
//! different conversations never block each other. Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use prompt::ChatMessage;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

/// Conversation key (Telegram chat id).
pub type ConversationId = i64;

/// Holds the turn lock of one conversation until dropped.
pub type TurnGuard = OwnedMutexGuard<()>;

#[derive(Default)]
struct Conversation {
    messages: Mutex<Vec<ChatMessage>>,
    turn: Arc<Mutex<()>>,
}

/// Shared, cheaply cloneable store of per-conversation message history.
#[derive(Clone)]
pub struct ContextStore {
    system_prompt: Arc<str>,
    max_messages: usize,
    conversations: Arc<RwLock<HashMap<ConversationId, Arc<Conversation>>>>,
}

impl ContextStore {
    /// Creates an empty store. `max_messages` counts the system message and is clamped to at least 1.
    pub fn new(system_prompt: impl Into<String>, max_messages: usize) -> Self {
        let system_prompt: String = system_prompt.into();
        Self {
            system_prompt: Arc::from(system_prompt),
            max_messages: max_messages.max(1),
            conversations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    fn system_message(&self) -> ChatMessage {
        ChatMessage::system(&*self.system_prompt)
    }

    /// Returns the entry for `id`, creating an empty one if needed.
    async fn conversation(&self, id: ConversationId) -> Arc<Conversation> {
        if let Some(conv) = self.conversations.read().await.get(&id) {
            return conv.clone();
        }
        let mut map = self.conversations.write().await;
        map.entry(id)
            .or_insert_with(|| {
                debug!(conversation_id = id, "Creating conversation entry");
                Arc::new(Conversation::default())
            })
            .clone()
    }

    async fn existing(&self, id: ConversationId) -> Option<Arc<Conversation>> {
        self.conversations.read().await.get(&id).cloned()
    }

    /// Acquires the turn lock of a conversation. Hold the guard across the whole exchange so two
    /// messages of the same chat cannot interleave their read-modify-write.
    pub async fn begin_turn(&self, id: ConversationId) -> TurnGuard {
        let conv = self.conversation(id).await;
        conv.turn.clone().lock_owned().await
    }

    /// Makes sure the conversation exists and starts with the system message. Idempotent.
    pub async fn ensure_initialized(&self, id: ConversationId) {
        let conv = self.conversation(id).await;
        let mut messages = conv.messages.lock().await;
        self.pin_system(id, &mut messages);
    }

    fn pin_system(&self, id: ConversationId, messages: &mut Vec<ChatMessage>) {
        match messages.first() {
            Some(first) if first.is_system() => {}
            Some(_) => {
                info!(conversation_id = id, "System message missing at head, reinserting");
                messages.insert(0, self.system_message());
            }
            None => messages.push(self.system_message()),
        }
    }

    /// Appends one message after initializing the conversation if needed.
    pub async fn append(&self, id: ConversationId, message: ChatMessage) {
        let conv = self.conversation(id).await;
        let mut messages = conv.messages.lock().await;
        self.pin_system(id, &mut messages);
        debug!(
            conversation_id = id,
            role = %message.role,
            len = messages.len() + 1,
            "Appending message"
        );
        messages.push(message);
    }

    /// Enforces the size bound: no-op when within `max_messages`, otherwise keeps the system
    /// message plus the `max_messages - 1` most recent non-system messages.
    pub async fn trim(&self, id: ConversationId) {
        let Some(conv) = self.existing(id).await else {
            return;
        };
        let mut messages = conv.messages.lock().await;
        if messages.len() <= self.max_messages {
            return;
        }
        let before = messages.len();
        let trimmed = trim_messages(&messages, self.max_messages, || self.system_message());
        *messages = trimmed;
        info!(
            conversation_id = id,
            before,
            after = messages.len(),
            "Context trimmed"
        );
    }

    /// Replaces the conversation with a fresh sequence holding only the system message.
    pub async fn reset(&self, id: ConversationId) {
        let conv = self.conversation(id).await;
        let mut messages = conv.messages.lock().await;
        *messages = vec![self.system_message()];
        info!(conversation_id = id, "Context reset");
    }

    /// Current sequence in order; empty if the conversation was never touched.
    pub async fn snapshot(&self, id: ConversationId) -> Vec<ChatMessage> {
        match self.existing(id).await {
            Some(conv) => conv.messages.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// Number of messages held for the conversation (0 if unknown).
    pub async fn len(&self, id: ConversationId) -> usize {
        match self.existing(id).await {
            Some(conv) => conv.messages.lock().await.len(),
            None => 0,
        }
    }

    /// Number of conversations seen since startup.
    pub async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

/// `[system] + last (max - 1) non-system messages`. The head is reused when it is a system
/// message, otherwise `fresh_system` supplies one.
fn trim_messages(
    messages: &[ChatMessage],
    max_messages: usize,
    fresh_system: impl FnOnce() -> ChatMessage,
) -> Vec<ChatMessage> {
    let system = match messages.first() {
        Some(first) if first.is_system() => first.clone(),
        _ => fresh_system(),
    };
    let tail: Vec<&ChatMessage> = messages.iter().filter(|m| !m.is_system()).collect();
    let keep = max_messages.saturating_sub(1);
    let start = tail.len().saturating_sub(keep);

    let mut out = Vec::with_capacity(keep + 1);
    out.push(system);
    out.extend(tail[start..].iter().map(|m| (*m).clone()));
    out
}
