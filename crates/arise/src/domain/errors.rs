//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

/// Generator output that does not match the expected content schema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Response was empty")]
    Empty,

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON array, got {0}")]
    NotAnArray(&'static str),

    #[error("Item {index} does not match the {kind} schema: {reason}")]
    Schema {
        kind: &'static str,
        index: usize,
        reason: String,
    },
}

/// Failure of a call to the generative content provider
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("No API key configured for the content generator")]
    MissingCredentials,

    #[error("Rate limited by the content generator")]
    RateLimited {
        retry_after: Option<std::time::Duration>,
    },

    #[error("Content generator rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Content generator API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request to the content generator failed: {0}")]
    Request(String),

    #[error("Content generator returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Rate-limit and quota signals are the only retryable failures
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerationError::RateLimited { .. })
    }
}
