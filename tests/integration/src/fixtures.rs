//! Test fixtures
//!
//! Canned IDs, payloads, and configuration shared by the integration tests.

use bot_common::BotConfig;
use bot_core::{Intents, Snowflake};
use bot_rest::Message;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Token the mock servers accept
pub const TEST_TOKEN: &str = "test-bot-token";

/// Channel the mock REST API treats as existing
pub const TEST_CHANNEL_ID: u64 = 41_771_983_423_143_937;

/// Channel the mock REST API answers with 404
pub const MISSING_CHANNEL_ID: u64 = 404;

/// Config pointed at a mock REST API
pub fn test_config(api_base_url: &str) -> BotConfig {
    BotConfig::new(TEST_TOKEN, Intents::DEFAULT)
        .with_api_base_url(api_base_url)
        .with_client_name("integration-bot")
}

/// Message JSON as the API would return it
pub fn message_json(id: Snowflake, channel_id: Snowflake, content: &str) -> Value {
    json!({
        "id": id.to_string(),
        "channel_id": channel_id.to_string(),
        "content": content,
        "author": {"id": "80351110224678912", "username": "someone", "bot": false},
        "timestamp": id.created_at().to_rfc3339(),
        "pinned": false,
        "type": 0
    })
}

/// Message created at `at` in the test channel
pub fn message_at(at: DateTime<Utc>, content: &str) -> Message {
    let id = Snowflake::from_datetime(at);
    serde_json::from_value(message_json(id, Snowflake::new(TEST_CHANNEL_ID), content))
        .expect("fixture message must deserialize")
}

/// READY dispatch body
pub fn ready_payload() -> Value {
    json!({
        "v": 10,
        "user": {"id": "80351110224678912", "username": "integration-bot", "bot": true},
        "session_id": "d1c3b7f6",
        "guilds": [{"id": "41771983423143937", "unavailable": true}],
        "resume_gateway_url": "wss://gateway.test"
    })
}
