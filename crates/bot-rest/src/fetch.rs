//! Read-only queries

use crate::client::RestClient;
use crate::error::{RestError, RestResult};
use crate::models::Message;
use bot_core::Snowflake;
use reqwest::Method;

/// Query namespace
#[derive(Debug, Clone, Copy)]
pub struct FetchApi<'a> {
    client: &'a RestClient,
}

impl<'a> FetchApi<'a> {
    /// Default number of messages returned by `messages`
    pub const DEFAULT_MESSAGE_LIMIT: u8 = 50;
    /// Upper bound accepted by the API
    pub const MAX_MESSAGE_LIMIT: u8 = 100;

    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Fetch the most recent messages of a channel, newest first
    pub async fn messages(&self, channel_id: Snowflake, limit: u8) -> RestResult<Vec<Message>> {
        if limit == 0 || limit > Self::MAX_MESSAGE_LIMIT {
            return Err(RestError::InvalidArgument(format!(
                "limit must be between 1 and {}, got {limit}",
                Self::MAX_MESSAGE_LIMIT
            )));
        }

        let channel = channel_id.to_string();
        let url = self.client.endpoint(&["channels", &channel, "messages"])?;
        let request = self
            .client
            .request(Method::GET, url)
            .query(&[("limit", limit)]);

        self.client.send_json(request).await
    }

    /// Fetch messages with the default limit
    pub async fn recent_messages(&self, channel_id: Snowflake) -> RestResult<Vec<Message>> {
        self.messages(channel_id, Self::DEFAULT_MESSAGE_LIMIT).await
    }
}
