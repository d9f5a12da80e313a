//! Gateway message format
//!
//! Every frame is a JSON envelope `{op, d, s, t}`. Outbound frames always carry
//! `d`, even when it is `null`; inbound frames are decoded into [`GatewayEvent`].

use super::{HelloPayload, IdentifyPayload, OpCode, PresenceUpdatePayload};
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw inbound envelope
///
/// `op` stays a raw number so unknown opcodes decode instead of failing.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: u64,

    /// Event name (only for op=0 Dispatch)
    #[serde(default)]
    pub t: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(default)]
    pub s: Option<u64>,

    /// Event data payload
    #[serde(default)]
    pub d: Value,
}

impl GatewayMessage {
    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Known opcode, if any
    #[must_use]
    pub fn opcode(&self) -> Option<OpCode> {
        OpCode::from_raw(self.op)
    }
}

/// Decoded inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// op 10: start heartbeating and identify
    Hello(HelloPayload),
    /// op 11: the last heartbeat was received
    HeartbeatAck,
    /// op 0: a named event for the dispatch table
    Dispatch {
        event: String,
        sequence: Option<u64>,
        data: Value,
    },
    /// Any other opcode; ignored by the session
    Unknown { op: u64 },
}

impl GatewayEvent {
    /// Decode a text frame
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let message = GatewayMessage::from_json(raw)
            .map_err(|e| GatewayError::MalformedMessage(e.to_string()))?;
        Self::try_from(message)
    }
}

impl TryFrom<GatewayMessage> for GatewayEvent {
    type Error = GatewayError;

    fn try_from(message: GatewayMessage) -> Result<Self, Self::Error> {
        match message.opcode() {
            Some(OpCode::Hello) => serde_json::from_value(message.d)
                .map(Self::Hello)
                .map_err(|e| GatewayError::MalformedMessage(format!("invalid Hello payload: {e}"))),
            Some(OpCode::HeartbeatAck) => Ok(Self::HeartbeatAck),
            Some(OpCode::Dispatch) => {
                let event = message.t.ok_or_else(|| {
                    GatewayError::MalformedMessage("dispatch without event name".to_string())
                })?;
                Ok(Self::Dispatch {
                    event,
                    sequence: message.s,
                    data: message.d,
                })
            }
            _ => Ok(Self::Unknown { op: message.op }),
        }
    }
}

/// Outbound envelope
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub op: OpCode,
    pub d: Value,
}

impl OutboundMessage {
    /// Heartbeat (op=1) with a `null` payload
    #[must_use]
    pub fn heartbeat() -> Self {
        Self {
            op: OpCode::Heartbeat,
            d: Value::Null,
        }
    }

    /// Identify (op=2)
    pub fn identify(payload: &IdentifyPayload) -> Result<Self, serde_json::Error> {
        Ok(Self {
            op: OpCode::Identify,
            d: serde_json::to_value(payload)?,
        })
    }

    /// Presence Update (op=3)
    pub fn presence_update(payload: PresenceUpdatePayload) -> Result<Self, serde_json::Error> {
        Ok(Self {
            op: OpCode::PresenceUpdate,
            d: serde_json::to_value(payload)?,
        })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OutboundMessage(op={})", self.op)
    }
}
