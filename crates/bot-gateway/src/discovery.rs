//! Gateway URL discovery

use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use bot_rest::RestClient;

/// Resolves the base socket URL for a new session
#[async_trait]
pub trait GatewayDiscovery: Send + Sync {
    async fn gateway_url(&self) -> GatewayResult<String>;
}

#[async_trait]
impl GatewayDiscovery for RestClient {
    async fn gateway_url(&self) -> GatewayResult<String> {
        let info = self.gateway_bot().await.map_err(GatewayError::discovery)?;

        if let Some(limit) = &info.session_start_limit {
            tracing::debug!(
                remaining = limit.remaining,
                total = limit.total,
                reset_after_ms = limit.reset_after,
                "Session start limit"
            );
        }

        Ok(info.url)
    }
}

/// Always returns the same URL
#[derive(Debug, Clone)]
pub struct StaticDiscovery {
    url: String,
}

impl StaticDiscovery {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl GatewayDiscovery for StaticDiscovery {
    async fn gateway_url(&self) -> GatewayResult<String> {
        Ok(self.url.clone())
    }
}

/// Append the protocol version and JSON encoding to a discovered URL
///
/// URLs that already carry a query string are used as given.
#[must_use]
pub fn connect_url(base: &str, version: u8) -> String {
    if base.contains('?') {
        return base.to_string();
    }
    format!("{}/?v={version}&encoding=json", base.trim_end_matches('/'))
}
