//! Command handlers for the game context.
//!
//! Each handler checks that the command targets the given session, runs the
//! domain method, and drains the events it recorded.

use dicemap_core::aggregate::AggregateRoot;
use dicemap_core::clock::Clock;
use dicemap_core::command::Command;
use dicemap_core::error::DomainError;
use tracing::{debug, info};

use crate::domain::aggregates::{GameSession, RollProgress};
use crate::domain::commands::{BeginRoll, CompleteRoll, StartSession, SubmitOutcome};
use crate::domain::events::GameEvent;

/// Result of an accepted `SubmitOutcome`.
#[derive(Debug, Clone)]
pub struct OutcomeAccepted {
    /// Whether the round resolved or is settling.
    pub progress: RollProgress,
    /// Events recorded while handling the command.
    pub events: Vec<GameEvent>,
}

fn ensure_target(session: &GameSession, command: &impl Command) -> Result<(), DomainError> {
    let target = command.target_id();
    if session.aggregate_id() == target {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{} targets session {target}, not {}",
            command.command_type(),
            session.aggregate_id()
        )))
    }
}

/// Handles the `StartSession` command.
///
/// # Errors
///
/// Returns `DomainError` if the command targets another session or the
/// session has already started.
pub fn handle_start_session(
    session: &mut GameSession,
    command: &StartSession,
    clock: &dyn Clock,
) -> Result<Vec<GameEvent>, DomainError> {
    ensure_target(session, command)?;
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling command"
    );

    session.start(command.correlation_id, clock)?;

    info!(
        session_id = %session.id,
        regions = session.catalog().len(),
        "session started"
    );
    Ok(session.take_uncommitted_events())
}

/// Handles the `BeginRoll` command.
///
/// # Errors
///
/// Returns `DomainError` if the command targets another session or the
/// session cannot roll right now.
pub fn handle_begin_roll(
    session: &mut GameSession,
    command: &BeginRoll,
    clock: &dyn Clock,
) -> Result<Vec<GameEvent>, DomainError> {
    ensure_target(session, command)?;
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling command"
    );

    session.begin_roll(command.correlation_id, clock)?;

    info!(
        session_id = %session.id,
        round = session.round() + 1,
        "roll begun"
    );
    Ok(session.take_uncommitted_events())
}

/// Handles the `SubmitOutcome` command.
///
/// # Errors
///
/// Returns `DomainError` if the command targets another session, no roll is
/// waiting for an outcome, or the value is not a die face.
pub fn handle_submit_outcome(
    session: &mut GameSession,
    command: &SubmitOutcome,
    clock: &dyn Clock,
) -> Result<OutcomeAccepted, DomainError> {
    ensure_target(session, command)?;
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        value = command.value,
        "handling command"
    );

    let progress = session.submit_outcome(command.value, command.correlation_id, clock)?;

    match progress {
        RollProgress::Resolved => info!(
            session_id = %session.id,
            round = session.round(),
            survivors = session.survivors().len(),
            "round resolved"
        ),
        RollProgress::Settling { remaining } => info!(
            session_id = %session.id,
            remaining_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
            "outcome received, roll settling"
        ),
    }

    Ok(OutcomeAccepted {
        progress,
        events: session.take_uncommitted_events(),
    })
}

/// Handles the `CompleteRoll` command.
///
/// # Errors
///
/// Returns `DomainError::RollSettling` if called before the minimum rolling
/// time, or another `DomainError` if no outcome is waiting.
pub fn handle_complete_roll(
    session: &mut GameSession,
    command: &CompleteRoll,
    clock: &dyn Clock,
) -> Result<Vec<GameEvent>, DomainError> {
    ensure_target(session, command)?;
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling command"
    );

    session.complete_roll(command.correlation_id, clock)?;

    info!(
        session_id = %session.id,
        round = session.round(),
        survivors = session.survivors().len(),
        "round resolved"
    );
    Ok(session.take_uncommitted_events())
}
