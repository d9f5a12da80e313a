//! Payload definitions
//!
//! `d` bodies for the handshake and the client-sent opcodes.

use bot_core::{Intents, Presence, PresenceStatus};
use serde::{Deserialize, Serialize};

/// Payload for op 10 (Hello)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
}

/// Payload for op 2 (Identify)
///
/// `Debug` is implemented by hand so the token never reaches a log.
#[derive(Clone, Serialize)]
pub struct IdentifyPayload {
    pub token: String,
    pub intents: Intents,
    pub properties: IdentifyProperties,
    pub presence: Presence,
}

impl std::fmt::Debug for IdentifyPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifyPayload")
            .field("token", &"[REDACTED]")
            .field("intents", &self.intents)
            .field("properties", &self.properties)
            .field("presence", &self.presence)
            .finish()
    }
}

/// Client connection properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyProperties {
    /// Operating system
    #[serde(rename = "$os")]
    pub os: String,

    /// Library or client name
    #[serde(rename = "$browser")]
    pub browser: String,

    /// Device name
    #[serde(rename = "$device")]
    pub device: String,
}

impl IdentifyProperties {
    /// Properties for this host, identifying as `client_name`
    #[must_use]
    pub fn for_client(client_name: impl Into<String>) -> Self {
        let client_name = client_name.into();
        Self {
            os: std::env::consts::OS.to_string(),
            browser: client_name.clone(),
            device: client_name,
        }
    }
}

/// Payload for op 3 (Presence Update)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresenceUpdatePayload {
    pub status: PresenceStatus,
    pub afk: bool,
}

impl From<Presence> for PresenceUpdatePayload {
    fn from(presence: Presence) -> Self {
        Self {
            status: presence.status,
            afk: presence.afk,
        }
    }
}
