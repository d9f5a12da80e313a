//! REST Integration Tests
//!
//! Exercises the command layer against the in-process REST API.
//!
//! Run with: cargo test -p integration-tests --test rest_tests

use bot_core::Snowflake;
use bot_rest::{RestClient, RestError};
use chrono::{Duration, Utc};
use integration_tests::{fixtures::*, MockRestApi};
use serde_json::json;

async fn setup() -> (MockRestApi, RestClient) {
    let api = MockRestApi::start().await.expect("Failed to start REST mock");
    let client = RestClient::new(&test_config(&api.base_url())).expect("Failed to build client");
    (api, client)
}

fn channel() -> Snowflake {
    Snowflake::new(TEST_CHANNEL_ID)
}

// ============================================================================
// Discovery Tests
// ============================================================================

#[tokio::test]
async fn test_gateway_bot() {
    let (api, client) = setup().await;
    api.set_gateway_url("wss://gateway.test");

    let info = client.gateway_bot().await.unwrap();
    assert_eq!(info.url, "wss://gateway.test");
    assert_eq!(info.shards, Some(1));
    assert_eq!(info.session_start_limit.map(|l| l.remaining), Some(999));

    let request = api.last_request().unwrap();
    assert_eq!(request.path, "/api/v10/gateway/bot");
    assert_eq!(
        request.authorization.as_deref(),
        Some(format!("Bot {TEST_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_rejected_token() {
    let api = MockRestApi::start().await.unwrap();
    let client = RestClient::new(&test_config(&api.base_url()).with_token("nope")).unwrap();

    let err = client.gateway_bot().await.unwrap_err();
    assert!(err.is_unauthorized());
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_text() {
    let (api, client) = setup().await;

    let message = client.messages().send(channel(), "hello").await.unwrap();
    assert_eq!(message.channel_id, channel());
    assert_eq!(message.content, "hello");

    let request = api.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.path,
        format!("/api/v10/channels/{TEST_CHANNEL_ID}/messages")
    );
    assert_eq!(request.body, Some(json!({"content": "hello"})));
}

#[tokio::test]
async fn test_send_embeds() {
    let (api, client) = setup().await;
    let embeds = vec![json!({"title": "Status", "description": "All good"})];

    client.messages().send(channel(), embeds.clone()).await.unwrap();

    let request = api.last_request().unwrap();
    assert_eq!(request.body, Some(json!({"embeds": embeds})));
}

#[tokio::test]
async fn test_reply() {
    let (api, client) = setup().await;
    let original = message_at(Utc::now(), "!ping");

    let reply = client.messages().reply(&original, "Pong!").await.unwrap();
    assert_eq!(
        reply.extra["message_reference"]["message_id"],
        original.id.to_string()
    );

    let request = api.last_request().unwrap();
    assert_eq!(
        request.body,
        Some(json!({
            "content": "Pong!",
            "message_reference": {"message_id": original.id.to_string()}
        }))
    );
}

#[tokio::test]
async fn test_send_to_unknown_channel() {
    let (_api, client) = setup().await;

    let err = client
        .messages()
        .send(Snowflake::new(MISSING_CHANNEL_ID), "hello")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        RestError::Status { body, .. } => assert!(body.contains("Unknown Channel")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete() {
    let (api, client) = setup().await;
    let message = message_at(Utc::now(), "bye");

    client.messages().delete(&message).await.unwrap();

    let request = api.last_request().unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(
        request.path,
        format!("/api/v10/channels/{TEST_CHANNEL_ID}/messages/{}", message.id)
    );
}

#[tokio::test]
async fn test_purge_bulk() {
    let (api, client) = setup().await;
    let now = Utc::now();
    let messages = vec![
        message_at(now - Duration::minutes(5), "a"),
        message_at(now - Duration::days(3), "b"),
        message_at(now - Duration::days(13), "c"),
    ];

    client.messages().purge(channel(), &messages).await.unwrap();

    let request = api.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.path,
        format!("/api/v10/channels/{TEST_CHANNEL_ID}/messages/bulk-delete")
    );
    let ids: Vec<String> = messages.iter().map(|m| m.id.to_string()).collect();
    assert_eq!(request.body, Some(json!({"messages": ids})));
}

#[tokio::test]
async fn test_purge_single_uses_delete() {
    let (api, client) = setup().await;
    let messages = vec![message_at(Utc::now(), "only")];

    client.messages().purge(channel(), &messages).await.unwrap();

    let request = api.last_request().unwrap();
    assert_eq!(request.method, "DELETE");
}

#[tokio::test]
async fn test_purge_rejects_old_messages_without_request() {
    let (api, client) = setup().await;
    let now = Utc::now();
    let messages = vec![
        message_at(now, "new"),
        message_at(now - Duration::days(20), "old"),
    ];

    let err = client.messages().purge(channel(), &messages).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidArgument(_)));
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn test_react_encodes_emoji() {
    let (api, client) = setup().await;
    let message = message_at(Utc::now(), "nice");

    client.messages().react(&message, "👍").await.unwrap();

    let request = api.last_request().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(
        request.path,
        format!(
            "/api/v10/channels/{TEST_CHANNEL_ID}/messages/{}/reactions/%F0%9F%91%8D/@me",
            message.id
        )
    );
}

#[tokio::test]
async fn test_react_custom_emoji() {
    let (api, client) = setup().await;
    let message = message_at(Utc::now(), "nice");

    client.messages().react(&message, "blobcat:123").await.unwrap();

    let request = api.last_request().unwrap();
    assert!(request.path.ends_with("/reactions/blobcat:123/@me"));
}

// ============================================================================
// Fetch Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_messages_with_limit() {
    let (api, client) = setup().await;

    let messages = client.fetch().messages(channel(), 5).await.unwrap();
    assert_eq!(messages.len(), 5);
    assert!(messages.iter().all(|m| m.channel_id == channel()));

    let request = api.last_request().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.query.as_deref(), Some("limit=5"));
}

#[tokio::test]
async fn test_fetch_default_limit() {
    let (api, client) = setup().await;

    let messages = client.fetch().recent_messages(channel()).await.unwrap();
    assert_eq!(messages.len(), 50);
    assert_eq!(api.last_request().unwrap().query.as_deref(), Some("limit=50"));
}
