//! The task that owns a game session.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use dicemap_core::clock::Clock;
use dicemap_core::error::DomainError;
use dicemap_core::event::DomainEvent;
use dicemap_game::application::command_handlers::{
    handle_begin_roll, handle_complete_roll, handle_submit_outcome,
};
use dicemap_game::application::query_handlers::{SessionView, get_session_view};
use dicemap_game::domain::aggregates::{GameSession, RollProgress};
use dicemap_game::domain::commands::{BeginRoll, CompleteRoll, SubmitOutcome};
use dicemap_game::domain::events::GameEvent;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::Sleep;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub(crate) type Reply = oneshot::Sender<Result<SessionView, DomainError>>;

/// Messages accepted by the session task.
#[derive(Debug)]
pub(crate) enum SessionMessage {
    BeginRoll {
        correlation_id: Uuid,
        reply: Reply,
    },
    SubmitOutcome {
        correlation_id: Uuid,
        value: f64,
        reply: Reply,
    },
    Snapshot {
        reply: oneshot::Sender<SessionView>,
    },
    Shutdown {
        reply: oneshot::Sender<SessionView>,
    },
}

/// Roll waiting for its minimum rolling time to pass.
struct Settling {
    correlation_id: Uuid,
    timer: Pin<Box<Sleep>>,
}

pub(crate) struct SessionActor {
    session: GameSession,
    clock: Arc<dyn Clock>,
    receiver: mpsc::Receiver<SessionMessage>,
    views: watch::Sender<SessionView>,
    events: broadcast::Sender<GameEvent>,
    settling: Option<Settling>,
}

impl SessionActor {
    pub(crate) fn new(
        session: GameSession,
        clock: Arc<dyn Clock>,
        receiver: mpsc::Receiver<SessionMessage>,
        views: watch::Sender<SessionView>,
        events: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            session,
            clock,
            receiver,
            views,
            events,
            settling: None,
        }
    }

    /// Processes messages one at a time until shut down or every handle is gone.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                message = self.receiver.recv() => match message {
                    Some(SessionMessage::Shutdown { reply }) => {
                        let _ = reply.send(get_session_view(&self.session));
                        break;
                    }
                    Some(message) => self.handle(message),
                    None => break,
                },
                () = settled(&mut self.settling) => self.complete_roll(),
            }
        }

        if self.settling.take().is_some() {
            debug!(session_id = %self.session.id, "pending roll dropped on teardown");
        }
        info!(session_id = %self.session.id, "session host stopped");
    }

    fn handle(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::BeginRoll {
                correlation_id,
                reply,
            } => {
                let result = self.begin_roll(correlation_id);
                let _ = reply.send(result);
            }
            SessionMessage::SubmitOutcome {
                correlation_id,
                value,
                reply,
            } => {
                let result = self.submit_outcome(correlation_id, value);
                let _ = reply.send(result);
            }
            SessionMessage::Snapshot { reply } => {
                let _ = reply.send(get_session_view(&self.session));
            }
            // Intercepted by `run`.
            SessionMessage::Shutdown { reply } => {
                let _ = reply.send(get_session_view(&self.session));
            }
        }
    }

    #[instrument(skip(self), fields(session_id = %self.session.id))]
    fn begin_roll(&mut self, correlation_id: Uuid) -> Result<SessionView, DomainError> {
        let command = BeginRoll {
            correlation_id,
            session_id: self.session.id,
        };
        match handle_begin_roll(&mut self.session, &command, self.clock.as_ref()) {
            Ok(events) => Ok(self.publish(events)),
            Err(DomainError::DoubleSubmission(reason)) => {
                debug!(%reason, "begin roll ignored");
                Ok(get_session_view(&self.session))
            }
            Err(error) => Err(error),
        }
    }

    #[instrument(skip(self), fields(session_id = %self.session.id))]
    fn submit_outcome(
        &mut self,
        correlation_id: Uuid,
        value: f64,
    ) -> Result<SessionView, DomainError> {
        let command = SubmitOutcome {
            correlation_id,
            session_id: self.session.id,
            value,
        };
        match handle_submit_outcome(&mut self.session, &command, self.clock.as_ref()) {
            Ok(accepted) => {
                if let RollProgress::Settling { remaining } = accepted.progress {
                    self.arm(correlation_id, remaining);
                }
                Ok(self.publish(accepted.events))
            }
            Err(DomainError::DoubleSubmission(reason)) => {
                debug!(%reason, "outcome ignored");
                Ok(get_session_view(&self.session))
            }
            Err(error) => {
                warn!(%error, value, "outcome rejected");
                Err(error)
            }
        }
    }

    #[instrument(skip(self), fields(session_id = %self.session.id))]
    fn complete_roll(&mut self) {
        let Some(settling) = self.settling.take() else {
            return;
        };
        let command = CompleteRoll {
            correlation_id: settling.correlation_id,
            session_id: self.session.id,
        };
        match handle_complete_roll(&mut self.session, &command, self.clock.as_ref()) {
            Ok(events) => {
                self.publish(events);
            }
            Err(DomainError::RollSettling { remaining_ms }) => {
                debug!(remaining_ms, "roll still settling, re-arming");
                let remaining = Duration::from_millis(u64::try_from(remaining_ms).unwrap_or(0));
                self.arm(settling.correlation_id, remaining);
            }
            Err(error) => warn!(%error, "settled roll could not complete"),
        }
    }

    fn arm(&mut self, correlation_id: Uuid, remaining: Duration) {
        self.settling = Some(Settling {
            correlation_id,
            timer: Box::pin(tokio::time::sleep(remaining)),
        });
    }

    /// Publishes the committed snapshot, then the events that produced it.
    fn publish(&self, events: Vec<GameEvent>) -> SessionView {
        let view = get_session_view(&self.session);
        self.views.send_replace(view.clone());
        for event in events {
            debug!(
                event_type = event.event_type(),
                sequence = event.metadata().sequence_number,
                payload = %event.to_payload(),
                "publishing event"
            );
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        view
    }
}

/// Resolves when the settling timer fires; never resolves without one.
async fn settled(settling: &mut Option<Settling>) {
    match settling {
        Some(settling) => settling.timer.as_mut().await,
        None => std::future::pending().await,
    }
}
