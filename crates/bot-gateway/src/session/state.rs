//! Connection state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle of a gateway connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No socket
    #[default]
    Disconnected,
    /// Discovering the gateway URL and opening the socket
    Connecting,
    /// Socket open, waiting for Hello
    AwaitingHello,
    /// Identify sent, waiting for the first dispatch
    Identifying,
    /// Dispatches are flowing
    Connected,
}

impl ConnectionState {
    /// Check if a socket is open
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(
            self,
            Self::AwaitingHello | Self::Identifying | Self::Connected
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::AwaitingHello => "awaiting_hello",
            Self::Identifying => "identifying",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared, observable connection state
///
/// Written by the client and the session task; read by anyone.
#[derive(Debug, Clone)]
pub struct StateHandle {
    tx: Arc<watch::Sender<ConnectionState>>,
}

impl StateHandle {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectionState::Disconnected);
        Self { tx: Arc::new(tx) }
    }

    /// Current state
    #[must_use]
    pub fn get(&self) -> ConnectionState {
        *self.tx.borrow()
    }

    /// Move to `state`
    pub fn set(&self, state: ConnectionState) {
        let previous = self.tx.send_replace(state);
        if previous != state {
            tracing::debug!(from = %previous, to = %state, "Connection state changed");
        }
    }

    /// Receiver notified on every change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new()
    }
}
