//! Gateway intents bitflags
//!
//! Intents select which event categories the server pushes over the gateway.
//! Sent once, inside the Identify payload.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Gateway intent flags
    ///
    /// Unknown bits are retained so a raw bitmask from configuration reaches
    /// the wire unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Intents: u64 {
        /// Guild create/update/delete, role and channel events
        const GUILDS                        = 1 << 0;
        /// Member add/update/remove (privileged)
        const GUILD_MEMBERS                 = 1 << 1;
        /// Ban and audit log events
        const GUILD_MODERATION              = 1 << 2;
        /// Emoji and sticker updates
        const GUILD_EMOJIS_AND_STICKERS     = 1 << 3;
        /// Integration updates
        const GUILD_INTEGRATIONS            = 1 << 4;
        /// Webhook updates
        const GUILD_WEBHOOKS                = 1 << 5;
        /// Invite create/delete
        const GUILD_INVITES                 = 1 << 6;
        /// Voice state updates
        const GUILD_VOICE_STATES            = 1 << 7;
        /// Presence updates (privileged)
        const GUILD_PRESENCES               = 1 << 8;
        /// Guild message create/update/delete
        const GUILD_MESSAGES                = 1 << 9;
        /// Guild reaction add/remove
        const GUILD_MESSAGE_REACTIONS       = 1 << 10;
        /// Guild typing start
        const GUILD_MESSAGE_TYPING          = 1 << 11;
        /// Direct message create/update/delete
        const DIRECT_MESSAGES               = 1 << 12;
        /// Direct message reaction add/remove
        const DIRECT_MESSAGE_REACTIONS      = 1 << 13;
        /// Direct message typing start
        const DIRECT_MESSAGE_TYPING         = 1 << 14;
        /// Message content in message events (privileged)
        const MESSAGE_CONTENT               = 1 << 15;
        /// Scheduled event updates
        const GUILD_SCHEDULED_EVENTS        = 1 << 16;
        /// Auto moderation rule changes
        const AUTO_MODERATION_CONFIGURATION = 1 << 20;
        /// Auto moderation actions
        const AUTO_MODERATION_EXECUTION     = 1 << 21;

        /// Intents that require explicit approval for the bot account
        const PRIVILEGED = Self::GUILD_MEMBERS.bits()
            | Self::GUILD_PRESENCES.bits()
            | Self::MESSAGE_CONTENT.bits();

        /// Sensible default for a message-reading bot
        const DEFAULT = Self::GUILDS.bits()
            | Self::GUILD_MESSAGES.bits()
            | Self::MESSAGE_CONTENT.bits();
    }
}

impl Intents {
    /// Check whether any privileged intent is requested
    #[inline]
    pub fn is_privileged(&self) -> bool {
        self.intersects(Self::PRIVILEGED)
    }

    /// Parse from a decimal string, keeping unknown bits
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.trim().parse::<u64>().map(Self::from_bits_retain)
    }
}

impl Default for Intents {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Intents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// The gateway expects a plain integer
impl Serialize for Intents {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for Intents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

impl From<u64> for Intents {
    fn from(bits: u64) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<Intents> for u64 {
    fn from(intents: Intents) -> Self {
        intents.bits()
    }
}
