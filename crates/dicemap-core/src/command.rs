//! Command abstractions.

use uuid::Uuid;

/// A request to change one aggregate.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the events it causes.
    fn correlation_id(&self) -> Uuid;

    /// The aggregate this command is addressed to.
    fn target_id(&self) -> Uuid;
}
