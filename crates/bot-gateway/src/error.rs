//! Gateway error types

use crate::protocol::CloseCode;
use crate::transport::TransportError;
use thiserror::Error;

/// Boxed source error for connection failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Gateway client error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// `login` was called without a token
    #[error("Token not provided")]
    MissingCredential,

    /// Caller passed a value the gateway would reject
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Inbound frame could not be decoded
    #[error("Malformed gateway message: {0}")]
    MalformedMessage(String),

    /// Discovery or socket establishment failed
    #[error("Connection failed during {stage}: {source}")]
    ConnectionFailure {
        stage: &'static str,
        #[source]
        source: BoxError,
    },

    /// Operation requires an open session
    #[error("Not connected")]
    NotConnected,

    /// `connect` was called while a session is running
    #[error("Already connected")]
    AlreadyConnected,

    /// The gateway closed the socket
    #[error("Connection closed by gateway (code {code:?}): {reason}")]
    Closed { code: Option<u16>, reason: String },

    /// Socket read or write failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Outbound payload could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Client could not be built from configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Session task ended abnormally
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Wrap a discovery failure
    pub fn discovery(source: impl Into<BoxError>) -> Self {
        Self::ConnectionFailure {
            stage: "discovery",
            source: source.into(),
        }
    }

    /// Wrap a socket handshake failure
    pub fn handshake(source: impl Into<BoxError>) -> Self {
        Self::ConnectionFailure {
            stage: "handshake",
            source: source.into(),
        }
    }

    /// Known close code, if the gateway sent one
    #[must_use]
    pub fn close_code(&self) -> Option<CloseCode> {
        match self {
            Self::Closed {
                code: Some(code), ..
            } => CloseCode::from_u16(*code),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
