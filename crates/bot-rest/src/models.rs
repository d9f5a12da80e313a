//! Request and response bodies

use bot_core::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `GET /gateway/bot`
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayBotInfo {
    /// WebSocket URL to open
    pub url: String,
    /// Recommended shard count
    #[serde(default)]
    pub shards: Option<u32>,
    #[serde(default)]
    pub session_start_limit: Option<SessionStartLimit>,
}

/// Identify budget reported by discovery
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStartLimit {
    pub total: u32,
    pub remaining: u32,
    pub reset_after: u64,
    #[serde(default)]
    pub max_concurrency: Option<u32>,
}

/// Message author (subset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

/// Channel message
///
/// Only the fields the command layer needs are typed; everything else is
/// kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a message to send
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// Rich embeds, passed through as-is
    Embeds(Vec<Value>),
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Value>> for MessageContent {
    fn from(embeds: Vec<Value>) -> Self {
        Self::Embeds(embeds)
    }
}

/// `POST /channels/{id}/messages` body
#[derive(Debug, Serialize)]
pub(crate) struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
}

impl CreateMessage {
    pub fn new(content: MessageContent) -> Self {
        match content {
            MessageContent::Text(text) => Self {
                content: Some(text),
                embeds: None,
                message_reference: None,
            },
            MessageContent::Embeds(embeds) => Self {
                content: None,
                embeds: Some(embeds),
                message_reference: None,
            },
        }
    }

    pub fn replying_to(mut self, message_id: Snowflake) -> Self {
        self.message_reference = Some(MessageReference { message_id });
        self
    }
}

/// Reference to the message being replied to
#[derive(Debug, Serialize)]
pub(crate) struct MessageReference {
    pub message_id: Snowflake,
}

/// `POST /channels/{id}/messages/bulk-delete` body
#[derive(Debug, Serialize)]
pub(crate) struct BulkDelete {
    pub messages: Vec<Snowflake>,
}
