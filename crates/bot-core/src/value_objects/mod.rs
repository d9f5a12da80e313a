//! Value objects - immutable types that represent protocol concepts

mod intents;
mod presence;
mod snowflake;

pub use intents::Intents;
pub use presence::{Presence, PresenceParseError, PresenceStatus};
pub use snowflake::{Snowflake, SnowflakeParseError};
