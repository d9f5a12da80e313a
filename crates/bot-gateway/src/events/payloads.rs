//! Typed views of dispatch payloads
//!
//! Handlers receive raw JSON; these are for callers that want a typed READY.

use bot_core::Snowflake;
use serde::Deserialize;

/// READY payload, reduced to the fields the client logs
#[derive(Debug, Clone, Deserialize)]
pub struct ReadyEvent {
    /// Gateway protocol version
    pub v: u8,
    pub user: ReadyUser,
    pub session_id: String,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,
    /// URL to use when resuming
    #[serde(default)]
    pub resume_gateway_url: Option<String>,
}

/// The bot's own user
#[derive(Debug, Clone, Deserialize)]
pub struct ReadyUser {
    pub id: Snowflake,
    pub username: String,
}

/// Guild listed in READY before its GUILD_CREATE arrives
#[derive(Debug, Clone, Deserialize)]
pub struct UnavailableGuild {
    pub id: Snowflake,
    #[serde(default)]
    pub unavailable: bool,
}
