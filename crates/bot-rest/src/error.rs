//! REST error types

use thiserror::Error;

/// REST command error type
#[derive(Debug, Error)]
pub enum RestError {
    /// Rejected before any request was made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Base URL cannot carry path segments
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network, timeout, or body decoding failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

impl RestError {
    /// Check if the API rejected the credentials
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Check if the target resource does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// REST result type
pub type RestResult<T> = Result<T, RestError>;
