//! Error types for the cache client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Client Error Enum ==
/// Unified error type for the cache client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Endpoint unreachable, connection aborted, or non-2xx status
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be interpreted under the selected decode mode
    #[error("Decode error: {0}")]
    Decode(String),

    /// Command could not be serialized or is not expressible on the wire
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid client configuration
    #[error("Config error: {0}")]
    Config(String),
}

// == Conversions ==
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache client.
pub type Result<T> = std::result::Result<T, ClientError>;
