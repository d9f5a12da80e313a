//! # bot-gateway
//!
//! Client side of the push-event gateway: discovers the socket URL, performs
//! the Hello/Identify handshake, keeps the session alive with heartbeats, and
//! routes dispatch events to registered handlers.

pub mod client;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod heartbeat;
pub mod protocol;
pub mod session;
pub mod transport;

pub use client::GatewayClient;
pub use discovery::{connect_url, GatewayDiscovery, StaticDiscovery};
pub use error::{GatewayError, GatewayResult};
pub use events::GatewayEventType;
pub use session::ConnectionState;
