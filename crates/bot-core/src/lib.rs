//! # bot-core
//!
//! Value objects shared by the gateway session and the REST command layer.
//! This crate has no dependencies on networking or runtime crates.

pub mod value_objects;

// Re-export commonly used types at crate root
pub use value_objects::{
    Intents, Presence, PresenceParseError, PresenceStatus, Snowflake, SnowflakeParseError,
};
