use std::io;
use thiserror::Error;

/// Unified error type for the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The upstream provider reported a structured error object. The message
    /// already carries the provider name.
    #[error("{0}")]
    Api(String),

    /// Missing or unusable configuration, typically an absent credential.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A provider response decoded, but not into the expected shape.
    #[error("{0}")]
    Format(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Unknown or unexpected errors
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl RelayError {
    /// Errors the client should see as a plain-text reply body rather than a
    /// relay fault: a missing credential, an error the provider reported, or
    /// a provider response we could not make sense of.
    pub fn is_renderable(&self) -> bool {
        matches!(
            self,
            RelayError::Api(_) | RelayError::Config(_) | RelayError::Format(_)
        )
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            RelayError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            RelayError::Api(format!("API returned error status: {}", err))
        } else {
            RelayError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<String> for RelayError {
    fn from(err: String) -> Self {
        RelayError::Unknown(err)
    }
}

impl From<&str> for RelayError {
    fn from(err: &str) -> Self {
        RelayError::Unknown(err.to_string())
    }
}
