//! Bot configuration
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use crate::auth::BotToken;
use bot_core::Intents;
use std::env;
use std::time::Duration;

/// Main bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token; may be empty, login checks it
    pub token: BotToken,
    /// Event categories requested in Identify
    pub intents: Intents,
    /// REST API base, including the version segment
    pub api_base_url: String,
    /// Gateway protocol version appended to the socket URL
    pub gateway_version: u8,
    /// Client identifier sent in the Identify properties block
    pub client_name: String,
    /// Timeout for REST requests (discovery included)
    pub http_timeout: Duration,
    /// Deployment environment, selects the tracing preset
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_gateway_version() -> u8 {
    10
}

fn default_client_name() -> String {
    "gateway-bot".to_string()
}

fn default_http_timeout_secs() -> u64 {
    15
}

impl BotConfig {
    /// Create a configuration with defaults for everything but the credentials
    pub fn new(token: impl Into<BotToken>, intents: Intents) -> Self {
        Self {
            token: token.into(),
            intents,
            api_base_url: default_api_base_url(),
            gateway_version: default_gateway_version(),
            client_name: default_client_name(),
            http_timeout: Duration::from_secs(default_http_timeout_secs()),
            env: Environment::default(),
        }
    }

    /// Override the REST API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Replace the token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<BotToken>) -> Self {
        self.token = token.into();
        self
    }

    /// Override the client identifier
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Load configuration from environment variables
    ///
    /// A missing `BOT_TOKEN` is not an error here; `login` reports it.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let intents = match get("BOT_INTENTS") {
            Some(raw) => Intents::parse(&raw)
                .map_err(|_| ConfigError::InvalidValue("BOT_INTENTS", raw.clone()))?,
            None => Intents::default(),
        };

        let gateway_version = match get("GATEWAY_VERSION") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GATEWAY_VERSION", raw.clone()))?,
            None => default_gateway_version(),
        };

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_TIMEOUT_SECS", raw.clone()))?,
            None => default_http_timeout_secs(),
        };

        let env = match get("APP_ENV") {
            Some(raw) => {
                Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?
            }
            None => Environment::default(),
        };

        Ok(Self {
            token: get("BOT_TOKEN").map(BotToken::new).unwrap_or_default(),
            intents,
            api_base_url: get("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(default_api_base_url),
            gateway_version,
            client_name: get("CLIENT_NAME").unwrap_or_else(default_client_name),
            http_timeout: Duration::from_secs(http_timeout_secs),
            env,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
