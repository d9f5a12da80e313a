//! Authenticated HTTP client
//!
//! Holds the shared token and base URL; namespaces borrow it to issue requests.

use crate::error::{RestError, RestResult};
use crate::fetch::FetchApi;
use crate::messages::MessagesApi;
use crate::models::GatewayBotInfo;
use bot_common::{BotConfig, BotToken};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

/// REST API client
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    token: BotToken,
}

impl RestClient {
    /// Create a client from bot configuration
    pub fn new(config: &BotConfig) -> RestResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(format!(
                "{} ({}, {})",
                config.client_name,
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Self::with_http(http, &config.api_base_url, config.token.clone())
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http(http: reqwest::Client, base_url: &str, token: BotToken) -> RestResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| RestError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(RestError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Token shared with the gateway session
    pub fn token(&self) -> &BotToken {
        &self.token
    }

    /// Message commands
    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi::new(self)
    }

    /// Read-only queries
    pub fn fetch(&self) -> FetchApi<'_> {
        FetchApi::new(self)
    }

    /// Discover the gateway socket URL (`GET /gateway/bot`)
    pub async fn gateway_bot(&self) -> RestResult<GatewayBotInfo> {
        let url = self.endpoint(&["gateway", "bot"])?;
        let response = self.send(self.request(Method::GET, url)).await?;
        Ok(response.json().await?)
    }

    /// Build an endpoint URL from path segments (each one percent-encoded)
    pub(crate) fn endpoint(&self, segments: &[&str]) -> RestResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RestError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start an authenticated request
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.token.authorization_header())
    }

    /// Send a request and turn non-success statuses into errors
    pub(crate) async fn send(&self, request: RequestBuilder) -> RestResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(
            url = %response.url().path(),
            status = status.as_u16(),
            "REST request completed"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RestError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> RestResult<T> {
        Ok(self.send(request).await?.json().await?)
    }
}
