//! Gateway protocol definitions
//!
//! Defines the wire protocol including op codes, envelopes, payloads, and close codes.

mod close_codes;
mod messages;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use messages::{GatewayEvent, GatewayMessage, OutboundMessage};
pub use opcodes::OpCode;
pub use payloads::{HelloPayload, IdentifyPayload, IdentifyProperties, PresenceUpdatePayload};
