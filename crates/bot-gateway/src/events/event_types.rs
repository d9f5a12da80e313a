//! Gateway event names
//!
//! Names carried in the `t` field of Dispatch frames. Handlers can be
//! registered under any string; these cover the common ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Well-known dispatch event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    // Connection events
    /// Sent after a successful Identify
    Ready,
    /// Sent after a successful Resume
    Resumed,

    // Guild events
    /// Guild available, joined, or created
    GuildCreate,
    /// Guild settings changed
    GuildUpdate,
    /// Left guild, kicked, or guild deleted
    GuildDelete,
    /// User joined guild
    GuildMemberAdd,
    /// User left guild
    GuildMemberRemove,

    // Channel events
    ChannelCreate,
    ChannelUpdate,
    ChannelDelete,

    // Message events
    /// New message
    MessageCreate,
    /// Message edited
    MessageUpdate,
    /// Message deleted
    MessageDelete,
    /// Several messages deleted at once
    MessageDeleteBulk,
    MessageReactionAdd,
    MessageReactionRemove,

    // Other
    PresenceUpdate,
    TypingStart,
    InteractionCreate,
}

impl GatewayEventType {
    /// Get the wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Resumed => "RESUMED",
            Self::GuildCreate => "GUILD_CREATE",
            Self::GuildUpdate => "GUILD_UPDATE",
            Self::GuildDelete => "GUILD_DELETE",
            Self::GuildMemberAdd => "GUILD_MEMBER_ADD",
            Self::GuildMemberRemove => "GUILD_MEMBER_REMOVE",
            Self::ChannelCreate => "CHANNEL_CREATE",
            Self::ChannelUpdate => "CHANNEL_UPDATE",
            Self::ChannelDelete => "CHANNEL_DELETE",
            Self::MessageCreate => "MESSAGE_CREATE",
            Self::MessageUpdate => "MESSAGE_UPDATE",
            Self::MessageDelete => "MESSAGE_DELETE",
            Self::MessageDeleteBulk => "MESSAGE_DELETE_BULK",
            Self::MessageReactionAdd => "MESSAGE_REACTION_ADD",
            Self::MessageReactionRemove => "MESSAGE_REACTION_REMOVE",
            Self::PresenceUpdate => "PRESENCE_UPDATE",
            Self::TypingStart => "TYPING_START",
            Self::InteractionCreate => "INTERACTION_CREATE",
        }
    }
}

impl FromStr for GatewayEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown gateway event: {s}"))
    }
}

impl AsRef<str> for GatewayEventType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
