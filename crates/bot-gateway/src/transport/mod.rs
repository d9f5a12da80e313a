//! Socket transport
//!
//! The session only needs to send text, read the next frame, and close.
//! [`WebSocketConnector`] is the production implementation.

mod websocket;

pub use websocket::{WebSocketConnector, WebSocketTransport};

use async_trait::async_trait;
use thiserror::Error;

/// Transport error type
#[derive(Debug, Error)]
pub enum TransportError {
    /// WebSocket protocol or I/O error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Socket is already closed
    #[error("Socket closed")]
    Closed,
}

/// One inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text frame
    Text(String),
    /// Data frame that could not be decoded as text
    Invalid(String),
    /// Peer closed the socket, or the stream ended
    Closed { code: Option<u16>, reason: String },
}

/// An open gateway socket
#[async_trait]
pub trait Transport: Send {
    /// Send one text frame
    async fn send(&mut self, text: String) -> Result<(), TransportError>;

    /// Wait for the next data or close frame
    async fn recv(&mut self) -> Result<Frame, TransportError>;

    /// Close the socket normally
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Opens transports
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a socket to `url`
    async fn connect(&self, url: &str) -> Result<Box<dyn Transport>, TransportError>;
}
