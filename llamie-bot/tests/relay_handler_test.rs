//! Tests for [`RelayHandler`](llamie_bot::RelayHandler).
//!
//! Uses a real ContextStore with the recording Bot and scripted LlmClient from `mocks`.


use std::sync::Arc;
use std::time::Duration;

use context_store::ContextStore;
use llamie_bot::handlers::{EMPTY_MENTION_REPLY, REPLY_PREFIX};
use llamie_bot::RelayHandler;
use llamie_core::{Handler, HandlerResponse};
use mocks::*;
use prompt::ChatMessage;

const CHAT: i64 = -1001;

fn handler(
    store: &ContextStore,
    llm: Arc<ScriptedLlm>,
    bot: Arc<RecordingBot>,
    mention: Option<&str>,
) -> RelayHandler {
    RelayHandler::new(
        store.clone(),
        llm,
        bot,
        identity(),
        mention.map(String::from),
    )
}

/// **Test: Mention in a fresh chat yields `[system, user, assistant]`, the model saw `[system, user]`,
/// and the chat got the prefixed reply.**
#[tokio::test]
async fn mention_relays_and_records_exchange() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Reply("hello!".to_string()));
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    let resp = h.handle(&group_message(CHAT, "@LlamieBot hi")).await.unwrap();

    assert_eq!(resp, HandlerResponse::Reply("hello!".to_string()));
    assert_eq!(
        store.snapshot(CHAT).await,
        vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello!")
        ]
    );
    assert_eq!(
        llm.calls(),
        vec![vec![ChatMessage::system(SYSTEM), ChatMessage::user("hi")]]
    );
    assert_eq!(bot.sent(), vec![(CHAT, format!("{}hello!", REPLY_PREFIX))]);
}

/// **Test: Inference failure sends the error notice, returns Stop and keeps the user message.**
#[tokio::test]
async fn inference_error_keeps_user_message_and_notifies() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Fail("connection refused".to_string()));
    let bot = RecordingBot::new();
    let h = handler(&store, llm, bot.clone(), None);

    let resp = h.handle(&group_message(CHAT, "@LlamieBot hi")).await.unwrap();

    assert_eq!(resp, HandlerResponse::Stop);
    assert_eq!(
        store.snapshot(CHAT).await,
        vec![ChatMessage::system(SYSTEM), ChatMessage::user("hi")]
    );
    let texts = bot.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("⚠️ Error: "), "got: {}", texts[0]);
    assert!(texts[0].contains("connection refused"));
}

/// **Test: A bare mention greets without touching the store or the model.**
#[tokio::test]
async fn bare_mention_greets_without_side_effects() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Reply("unused".to_string()));
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    let resp = h.handle(&group_message(CHAT, "@LlamieBot")).await.unwrap();

    assert_eq!(resp, HandlerResponse::Reply(EMPTY_MENTION_REPLY.to_string()));
    assert!(store.snapshot(CHAT).await.is_empty());
    assert!(llm.calls().is_empty());
    assert_eq!(bot.texts(), vec![EMPTY_MENTION_REPLY.to_string()]);
}

/// **Test: Unaddressed group chatter continues the chain with no side effects.**
#[tokio::test]
async fn unaddressed_message_is_ignored() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Reply("unused".to_string()));
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    let resp = h.handle(&group_message(CHAT, "lunch anyone?")).await.unwrap();

    assert_eq!(resp, HandlerResponse::Continue);
    assert_eq!(store.conversation_count().await, 0);
    assert!(llm.calls().is_empty());
    assert!(bot.sent().is_empty());
}

/// **Test: A reply to the bot's own message is relayed without a mention.**
#[tokio::test]
async fn reply_to_bot_is_relayed() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Echo);
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    let msg = group_message(CHAT, "and then?").replying_to("77", BOT_ID);
    let resp = h.handle(&msg).await.unwrap();

    assert_eq!(resp, HandlerResponse::Reply("re: and then?".to_string()));
    assert_eq!(llm.calls().len(), 1);
}

/// **Test: A configured mention token replaces the `@username` default.**
#[tokio::test]
async fn configured_mention_token_is_used() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Echo);
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), Some("@OllamieBot"));

    let ignored = h.handle(&group_message(CHAT, "@LlamieBot hi")).await.unwrap();
    assert_eq!(ignored, HandlerResponse::Continue);

    let relayed = h.handle(&group_message(CHAT, "@OllamieBot hi")).await.unwrap();
    assert_eq!(relayed, HandlerResponse::Reply("re: hi".to_string()));
}

/// **Test: With N=3 the model sees a bounded context and the store keeps the latest turn.**
#[tokio::test]
async fn context_is_trimmed_across_turns() {
    let store = ContextStore::new(SYSTEM, 3);
    let llm = ScriptedLlm::new(Script::Echo);
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    h.handle(&private_reply(CHAT, "u1")).await.unwrap();
    h.handle(&private_reply(CHAT, "u2")).await.unwrap();

    // Second request: [system, u1, a1, u2] trimmed to [system, a1, u2].
    assert_eq!(
        llm.calls()[1],
        vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::assistant("re: u1"),
            ChatMessage::user("u2")
        ]
    );
    assert_eq!(
        store.snapshot(CHAT).await,
        vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user("u2"),
            ChatMessage::assistant("re: u2")
        ]
    );
}

fn private_reply(chat_id: i64, content: &str) -> llamie_core::Message {
    private_message(chat_id, content).replying_to("77", BOT_ID)
}

/// **Test: Two concurrent exchanges in one chat are serialized; no update is lost.**
#[tokio::test]
async fn concurrent_messages_in_one_chat_do_not_interleave() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::with_delay(Script::Echo, Duration::from_millis(30));
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    let first = {
        let h = h.clone();
        tokio::spawn(async move { h.handle(&group_message(CHAT, "@LlamieBot one")).await })
    };
    let second = {
        let h = h.clone();
        tokio::spawn(async move { h.handle(&group_message(CHAT, "@LlamieBot two")).await })
    };
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let snapshot = store.snapshot(CHAT).await;
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot[0], ChatMessage::system(SYSTEM));
    for pair in snapshot[1..].chunks(2) {
        assert_eq!(pair[1].content, format!("re: {}", pair[0].content));
    }
    // The second model call saw the first exchange in full.
    let calls = llm.calls();
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[1].len(), 4);
}

/// **Test: Different chats keep independent histories.**
#[tokio::test]
async fn chats_are_isolated() {
    let store = ContextStore::new(SYSTEM, 10);
    let llm = ScriptedLlm::new(Script::Echo);
    let bot = RecordingBot::new();
    let h = handler(&store, llm.clone(), bot.clone(), None);

    h.handle(&group_message(1, "@LlamieBot in one")).await.unwrap();
    h.handle(&group_message(2, "@LlamieBot in two")).await.unwrap();

    assert_eq!(store.snapshot(1).await[1], ChatMessage::user("in one"));
    assert_eq!(store.snapshot(2).await[1], ChatMessage::user("in two"));
    assert_eq!(llm.calls()[1].len(), 2);
    assert_eq!(bot.sent()[0].0, 1);
    assert_eq!(bot.sent()[1].0, 2);
}
