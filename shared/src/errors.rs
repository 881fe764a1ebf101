//! Error types for the Wellness Coach application

use thiserror::Error;

/// Service layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The document store could not be reached or failed the request.
    /// Safe to retry.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The external service could not be reached or sent garbage
    #[error("External service error: {0}")]
    External(String),

    /// The external service answered with a non-success status
    #[error("External service returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// A collaborator is not configured
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Storage(_) | ServiceError::External(_) => true,
            // 4xx means the request or its credentials are wrong; only
            // throttling clears up by itself.
            ServiceError::Upstream { status, .. } => *status == 429 || *status >= 500,
            ServiceError::Validation(_) | ServiceError::Unavailable(_) => false,
        }
    }
}
