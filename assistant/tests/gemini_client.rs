//! HTTP-level tests for the Gemini client against a mock server.

#![allow(clippy::unwrap_used, clippy::panic)]

use eventease_assistant::{
    Assistant, AssistantError, ChatTurn, ContentGenerator, FALLBACK_CHAT_REPLY, GeminiClient,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
}

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key").with_api_url(server.uri())
}

#[tokio::test]
async fn describe_event_posts_prompt_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("  An evening of ideas.  ")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.describe_event("Startup Pitch Night", "Business").await.unwrap();

    assert_eq!(text, "An evening of ideas.");
}

#[tokio::test]
async fn generate_image_returns_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .and(body_partial_json(json!({"parameters": {"aspectRatio": "16:9", "sampleCount": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/jpeg"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let url = client.generate_image("jazz night").await.unwrap();

    assert_eq!(url, "data:image/jpeg;base64,aGVsbG8=");
}

#[tokio::test]
async fn answer_query_sends_history_then_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "hi"}]},
                {"role": "model", "parts": [{"text": "hello!"}]},
                {"role": "user", "parts": [{"text": "any music events?"}]}
            ],
            "generationConfig": {"thinkingConfig": {"thinkingBudget": 0}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Yes, one.")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let history = [ChatTurn::user("hi"), ChatTurn::model("hello!")];
    let answer = client.answer_query("any music events?", &[], &history).await.unwrap();

    assert_eq!(answer, "Yes, one.");
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(matches!(
        client.describe_event("t", "c").await,
        Err(AssistantError::RateLimited)
    ));
    match client.generate_image("p").await {
        Err(AssistantError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn assistant_falls_back_when_api_rejects_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let assistant = Assistant::new(
        Arc::new(client_for(&server)),
        Duration::from_secs(5),
    );

    assert_eq!(
        assistant.answer_query("hello?", &[], &[]).await,
        FALLBACK_CHAT_REPLY
    );
}
