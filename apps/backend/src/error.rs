//! Error handling for the service layer

use thiserror::Error;

use crate::services::external::SynthesisError;

/// Service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Storage failures may succeed on retry. Everything else is final.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ServiceError::Database(_))
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
