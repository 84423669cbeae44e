//! Error types for the adaptive payments client

use thiserror::Error;

/// Result type alias for adaptive payments operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for adaptive payments operations
///
/// These are local failures only. A request that reached PayPal and came back
/// with a `Failure` acknowledgement is reported through
/// [`ApiFailure`](crate::types::ApiFailure) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Receiver data failed validation
    #[error("Invalid receiver: {message}")]
    InvalidReceiver { message: String },

    /// Receiver list would exceed the maximum length
    #[error("Maximum number of receivers exceeded: at most {max} allowed, got {got}")]
    MaxReceiversExceeded { max: usize, got: usize },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential value that cannot be sent as an HTTP header
    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Payload value could not be coerced to JSON
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Time zone name not found in the tz database
    #[error("Unknown time zone: {zone}")]
    UnknownTimeZone { zone: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Credential missing from the environment
    #[error("Missing credential: {name}")]
    MissingCredential { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid receiver error
    pub fn invalid_receiver(message: impl Into<String>) -> Self {
        Self::InvalidReceiver {
            message: message.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
