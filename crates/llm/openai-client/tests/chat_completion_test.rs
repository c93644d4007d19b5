//! HTTP-level tests for [`openai_client::OpenAIClient::chat_completion`].
//!
//! Uses a mockito server as the OpenAI-compatible endpoint, and a silent TCP listener to force a
//! timeout. No real network access.

use std::time::Duration;

use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, InferenceError, OpenAIClient,
};

fn messages() -> Vec<ChatCompletionRequestMessage> {
    vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content("be brief")
            .build()
            .unwrap()
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content("hi")
            .build()
            .unwrap()
            .into(),
    ]
}

const COMPLETION_BODY: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "created": 1706529600,
    "model": "gemma3n:e4b",
    "choices": [
        {
            "index": 0,
            "message": {"role": "assistant", "content": "hello!"},
            "finish_reason": "stop"
        }
    ],
    "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
}"#;

/// **Test: A 200 response returns the first choice's content; the model and messages are sent.**
#[tokio::test]
async fn chat_completion_returns_assistant_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"model": "gemma3n:e4b"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("ollama".to_string(), server.url());
    let reply = client.chat_completion("gemma3n:e4b", messages()).await.unwrap();

    assert_eq!(reply, "hello!");
    mock.assert_async().await;
}

/// **Test: A response without choices is EmptyResponse.**
#[tokio::test]
async fn chat_completion_without_choices_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "x", "object": "chat.completion", "created": 1, "model": "m", "choices": []}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("ollama".to_string(), server.url());
    let err = client.chat_completion("m", messages()).await.unwrap_err();

    assert!(matches!(err, InferenceError::EmptyResponse));
}

/// **Test: A 4xx API error maps to InferenceError::Api carrying the server message.**
#[tokio::test]
async fn chat_completion_api_error_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error": {"message": "model \"nope\" not found", "type": "api_error", "param": null, "code": null}}"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("ollama".to_string(), server.url());
    let err = client.chat_completion("nope", messages()).await.unwrap_err();

    match err {
        InferenceError::Api(msg) => assert!(msg.contains("not found"), "msg: {}", msg),
        other => panic!("expected Api error, got {:?}", other),
    }
}

/// **Test: A server that accepts but never answers hits the timeout.**
#[tokio::test]
async fn chat_completion_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _accept = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = OpenAIClient::with_base_url("ollama".to_string(), format!("http://{}", addr))
        .with_timeout(Duration::from_millis(200));
    let err = client.chat_completion("m", messages()).await.unwrap_err();

    assert!(matches!(err, InferenceError::Timeout(d) if d == Duration::from_millis(200)));
    assert!(err.to_string().contains("timed out"));
}
