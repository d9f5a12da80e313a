//! Message commands: send, reply, delete, bulk delete, react

use crate::client::RestClient;
use crate::error::{RestError, RestResult};
use crate::models::{BulkDelete, CreateMessage, Message, MessageContent};
use bot_core::Snowflake;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;

/// Most messages accepted by one bulk delete
pub const BULK_DELETE_MAX: usize = 100;

/// Messages older than this cannot be bulk deleted
pub const BULK_DELETE_MAX_AGE_DAYS: i64 = 14;

/// Message command namespace
#[derive(Debug, Clone, Copy)]
pub struct MessagesApi<'a> {
    client: &'a RestClient,
}

impl<'a> MessagesApi<'a> {
    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Post a message to a channel
    pub async fn send(
        &self,
        channel_id: Snowflake,
        content: impl Into<MessageContent>,
    ) -> RestResult<Message> {
        self.create(channel_id, CreateMessage::new(content.into()))
            .await
    }

    /// Post a message replying to `message`
    pub async fn reply(
        &self,
        message: &Message,
        content: impl Into<MessageContent>,
    ) -> RestResult<Message> {
        let body = CreateMessage::new(content.into()).replying_to(message.id);
        self.create(message.channel_id, body).await
    }

    async fn create(&self, channel_id: Snowflake, body: CreateMessage) -> RestResult<Message> {
        let channel = channel_id.to_string();
        let url = self.client.endpoint(&["channels", &channel, "messages"])?;
        let request = self.client.request(Method::POST, url).json(&body);
        self.client.send_json(request).await
    }

    /// Delete a single message
    pub async fn delete(&self, message: &Message) -> RestResult<()> {
        self.delete_by_id(message.channel_id, message.id).await
    }

    async fn delete_by_id(&self, channel_id: Snowflake, message_id: Snowflake) -> RestResult<()> {
        let channel = channel_id.to_string();
        let id = message_id.to_string();
        let url = self
            .client
            .endpoint(&["channels", &channel, "messages", &id])?;
        self.client
            .send(self.client.request(Method::DELETE, url))
            .await?;
        Ok(())
    }

    /// Delete several messages from one channel
    ///
    /// The bulk endpoint only accepts 2 to 100 messages younger than 14 days,
    /// so those limits are checked before any request. A single message
    /// goes through the regular delete endpoint.
    pub async fn purge(&self, channel_id: Snowflake, messages: &[Message]) -> RestResult<()> {
        let ids = validate_bulk_delete(messages, Utc::now())?;

        match ids.as_slice() {
            [] => Ok(()),
            [only] => self.delete_by_id(channel_id, *only).await,
            _ => {
                let channel = channel_id.to_string();
                let url = self
                    .client
                    .endpoint(&["channels", &channel, "messages", "bulk-delete"])?;
                let request = self
                    .client
                    .request(Method::POST, url)
                    .json(&BulkDelete { messages: ids });
                self.client.send(request).await?;
                Ok(())
            }
        }
    }

    /// Add a reaction as the bot user
    ///
    /// `emoji` is a unicode emoji or `name:id` for custom emoji.
    pub async fn react(&self, message: &Message, emoji: &str) -> RestResult<()> {
        if emoji.is_empty() {
            return Err(RestError::InvalidArgument("emoji must not be empty".into()));
        }

        let channel = message.channel_id.to_string();
        let id = message.id.to_string();
        let url = self.client.endpoint(&[
            "channels",
            &channel,
            "messages",
            &id,
            "reactions",
            emoji,
            "@me",
        ])?;
        self.client.send(self.client.request(Method::PUT, url)).await?;
        Ok(())
    }
}

/// Check bulk-delete limits and collect the IDs to delete
fn validate_bulk_delete(messages: &[Message], now: DateTime<Utc>) -> RestResult<Vec<Snowflake>> {
    if messages.len() > BULK_DELETE_MAX {
        return Err(RestError::InvalidArgument(format!(
            "cannot bulk delete {} messages, limit is {BULK_DELETE_MAX}",
            messages.len()
        )));
    }

    let oldest_allowed = Snowflake::from_datetime(now - Duration::days(BULK_DELETE_MAX_AGE_DAYS));
    if let Some(stale) = messages.iter().find(|m| m.id < oldest_allowed) {
        return Err(RestError::InvalidArgument(format!(
            "message {} is older than {BULK_DELETE_MAX_AGE_DAYS} days",
            stale.id
        )));
    }

    Ok(messages.iter().map(|m| m.id).collect())
}
