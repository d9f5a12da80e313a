//! Dispatch event names and the payloads the bot reads itself

mod event_types;
mod payloads;

pub use event_types::GatewayEventType;
pub use payloads::{ReadyEvent, ReadyUser, UnavailableGuild};
