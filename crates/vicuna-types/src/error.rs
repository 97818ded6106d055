//! Error types for vicuna.

use thiserror::Error;

/// Result type alias for vicuna operations.
pub type Result<T> = std::result::Result<T, VicunaError>;

/// Errors that can occur while talking to the market data API.
///
/// Every failure propagates to the caller; nothing is retried or swallowed
/// internally.
#[derive(Error, Debug)]
pub enum VicunaError {
    /// Upstream replied with a non-success HTTP status.
    #[error("HTTP error {status}: {reason}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Status text associated with the code.
        reason: String,
    },

    /// Response body did not match its declared content type.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Network-level failure surfaced unchanged from the transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A configured header name or value is not a valid HTTP header.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl From<serde_json::Error> for VicunaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
