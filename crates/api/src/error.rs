//! Error types for remote profile-API operations.

use thiserror::Error;

/// Errors that can occur while talking to the profile API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential exchange itself failed, or a request was rejected
    /// twice in a row. Fatal for the triggering operation.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A single request's bearer token was rejected. Internal trigger
    /// for the retry-once policy in the snapshot builder; never
    /// surfaces past it.
    #[error("Access token rejected by the API")]
    TokenRejected,

    /// The requested resource does not exist on the remote service.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Transport failure, including timeouts.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this failure means a character genuinely does not exist,
    /// as opposed to a transient or configuration problem.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
