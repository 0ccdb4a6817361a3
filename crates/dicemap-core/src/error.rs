//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A die outcome outside `1..=6` or not a whole number.
    #[error("invalid outcome: {0}")]
    InvalidOutcome(String),

    /// A roll was requested or reported while the session could not take it.
    #[error("double submission: {0}")]
    DoubleSubmission(String),

    /// The rolling state was asked to resolve before its minimum duration.
    #[error("roll still settling: {remaining_ms} ms remaining")]
    RollSettling {
        /// Milliseconds until the roll may resolve.
        remaining_ms: i64,
    },

    /// A validation error in construction or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The owning session host has shut down.
    #[error("session closed")]
    SessionClosed,
}
