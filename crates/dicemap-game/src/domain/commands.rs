//! Commands for the game context.

use dicemap_core::command::Command;
use uuid::Uuid;

/// Command to start a session so it accepts rolls.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to start.
    pub session_id: Uuid,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "game.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.session_id
    }
}

/// Command raised when the player asks to roll.
#[derive(Debug, Clone)]
pub struct BeginRoll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session rolling.
    pub session_id: Uuid,
}

impl Command for BeginRoll {
    fn command_type(&self) -> &'static str {
        "game.begin_roll"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.session_id
    }
}

/// Command raised when the dice widget reports its finished value.
///
/// The value is untrusted; it is validated into a die face by the session.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session rolling.
    pub session_id: Uuid,
    /// The raw value reported by the widget.
    pub value: f64,
}

impl Command for SubmitOutcome {
    fn command_type(&self) -> &'static str {
        "game.submit_outcome"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.session_id
    }
}

/// Command raised when a settling roll's minimum duration has elapsed.
#[derive(Debug, Clone)]
pub struct CompleteRoll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session rolling.
    pub session_id: Uuid,
}

impl Command for CompleteRoll {
    fn command_type(&self) -> &'static str {
        "game.complete_roll"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.session_id
    }
}
