//! Error types for spelling-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Conditions the scheduler detects on stored word state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("invalid srs level {level}, expected 0..=5")]
    InvalidState { level: i32 },
}
