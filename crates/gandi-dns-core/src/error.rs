//! Error types for the reconciliation system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the reconciliation system
#[derive(Error, Debug)]
pub enum Error {
    /// The record provider client cannot be reached or its required
    /// dependency is missing. Fatal, never retried internally.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A list/create/delete call against the provider failed
    #[error("provider error ({provider}): {operation} for {domain} failed: {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Operation that was attempted (list, create, delete)
        operation: String,
        /// Domain the operation targeted
        domain: String,
        /// Underlying cause
        message: String,
    },

    /// The provider returned output that cannot be parsed into the
    /// expected record shape
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors (subprocess plumbing and the like)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a provider-unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable(msg.into())
    }

    /// Create a provider error carrying enough context (domain, operation,
    /// cause) to diagnose credential or connectivity problems
    pub fn provider(
        provider: impl Into<String>,
        operation: impl Into<String>,
        domain: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            operation: operation.into(),
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
