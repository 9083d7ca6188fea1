//! Error types for provider calls.
//!
//! These never cross the adapter boundary: [`ModelProvider::generate_response`]
//! renders them into the returned string.
//!
//! [`ModelProvider::generate_response`]: crate::providers::ModelProvider::generate_response

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a provider.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials missing or still set to the placeholder.
    #[error("{0} API key not configured")]
    NotConfigured(String),

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// Provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    ProviderApi {
        /// HTTP status code.
        status: u16,
        /// Raw response body, usually a vendor error document.
        body: String,
    },

    /// Response parsed but did not contain the expected text.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
