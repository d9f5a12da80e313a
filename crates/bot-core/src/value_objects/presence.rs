//! Presence status and presence block
//!
//! The client declares its presence in Identify and may change it later with
//! a Presence Update.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared online status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    /// Online and active
    #[default]
    Online,
    /// Do not disturb
    Dnd,
    /// Away
    Idle,
    /// Connected but shown as offline
    Invisible,
}

impl PresenceStatus {
    /// Accepted wire values
    pub const VALID_STATUSES: &'static [&'static str] = &["online", "dnd", "idle", "invisible"];

    /// Get the wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Dnd => "dnd",
            Self::Idle => "idle",
            Self::Invisible => "invisible",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = PresenceParseError;

    // Exact match only: the gateway rejects "Online"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "dnd" => Ok(Self::Dnd),
            "idle" => Ok(Self::Idle),
            "invisible" => Ok(Self::Invisible),
            other => Err(PresenceParseError::UnknownStatus(other.to_string())),
        }
    }
}

/// Error when parsing a presence status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenceParseError {
    #[error("invalid status '{0}', must be one of: online, dnd, idle, invisible")]
    UnknownStatus(String),
}

/// Presence block sent in Identify and Presence Update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Presence {
    pub status: PresenceStatus,
    pub afk: bool,
}

impl Presence {
    /// Presence with the given status, not away
    #[must_use]
    pub const fn new(status: PresenceStatus) -> Self {
        Self { status, afk: false }
    }
}
