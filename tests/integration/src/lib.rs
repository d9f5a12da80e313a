//! Integration test utilities for the gateway bot
//!
//! Provides an in-process REST API and gateway so the client can be driven
//! end to end over real HTTP and WebSocket connections.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
