//! Caller-side handle to a running session.

use std::sync::Arc;

use dicemap_catalog::RegionCatalog;
use dicemap_core::clock::Clock;
use dicemap_core::error::DomainError;
use dicemap_game::GameConfig;
use dicemap_game::application::command_handlers::handle_start_session;
use dicemap_game::application::query_handlers::{SessionView, get_session_view};
use dicemap_game::domain::aggregates::GameSession;
use dicemap_game::domain::commands::StartSession;
use dicemap_game::domain::events::GameEvent;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::warn;
use uuid::Uuid;

use crate::actor::{SessionActor, SessionMessage};

const MAILBOX_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 64;

/// Cloneable handle to a session task.
///
/// The task stops when [`SessionHandle::shutdown`] is called or every
/// handle has been dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    sender: mpsc::Sender<SessionMessage>,
    views: watch::Receiver<SessionView>,
    events: broadcast::Sender<GameEvent>,
}

/// Starts a session over `catalog` on the current tokio runtime.
///
/// The session is started immediately and is waiting for its first roll.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
#[must_use]
pub fn spawn_session(
    catalog: Arc<RegionCatalog>,
    config: GameConfig,
    clock: Arc<dyn Clock>,
) -> SessionHandle {
    let session_id = Uuid::new_v4();
    let mut session = GameSession::new(session_id, catalog, config);
    let start = StartSession {
        correlation_id: Uuid::new_v4(),
        session_id,
    };
    if let Err(error) = handle_start_session(&mut session, &start, clock.as_ref()) {
        warn!(%error, %session_id, "session failed to start");
    }

    let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
    let (view_sender, views) = watch::channel(get_session_view(&session));
    let (events, _) = broadcast::channel(EVENT_CAPACITY);

    let actor = SessionActor::new(session, clock, receiver, view_sender, events.clone());
    tokio::spawn(actor.run());

    SessionHandle {
        session_id,
        sender,
        views,
        events,
    }
}

impl SessionHandle {
    /// The session identifier.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Asks to roll. A request while a roll is in progress, or after the
    /// last round, is ignored and the current view returned.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the session has stopped.
    pub async fn begin_roll(&self) -> Result<SessionView, DomainError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionMessage::BeginRoll {
            correlation_id: Uuid::new_v4(),
            reply,
        })
        .await?;
        response.await.map_err(|_| DomainError::SessionClosed)?
    }

    /// Reports the finished die value for the roll in progress.
    ///
    /// The returned view may still be `Resolving`; the round commits once the
    /// minimum rolling time has passed. Watch [`SessionHandle::watch`] for it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOutcome` if `value` is not a whole number
    /// in `1..=6`, and `DomainError::SessionClosed` if the session has stopped.
    pub async fn submit_outcome(&self, value: f64) -> Result<SessionView, DomainError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionMessage::SubmitOutcome {
            correlation_id: Uuid::new_v4(),
            value,
            reply,
        })
        .await?;
        response.await.map_err(|_| DomainError::SessionClosed)?
    }

    /// The current committed view, read through the session task.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the session has stopped.
    pub async fn snapshot(&self) -> Result<SessionView, DomainError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionMessage::Snapshot { reply }).await?;
        response.await.map_err(|_| DomainError::SessionClosed)
    }

    /// A receiver that always holds the latest committed view.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionView> {
        self.views.clone()
    }

    /// Subscribes to domain events recorded from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Stops the session and returns its final view. A roll still settling
    /// never resolves.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the session had already stopped.
    pub async fn shutdown(self) -> Result<SessionView, DomainError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionMessage::Shutdown { reply }).await?;
        response.await.map_err(|_| DomainError::SessionClosed)
    }

    async fn send(&self, message: SessionMessage) -> Result<(), DomainError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| DomainError::SessionClosed)
    }
}
