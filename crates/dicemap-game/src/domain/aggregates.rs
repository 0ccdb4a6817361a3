//! Aggregate root for a game session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dicemap_catalog::{ROUND_COUNT, Region, RegionCatalog};
use dicemap_core::aggregate::AggregateRoot;
use dicemap_core::clock::Clock;
use dicemap_core::error::DomainError;
use dicemap_core::event::EventMetadata;
use dicemap_geometry::LatLng;
use serde::Serialize;
use uuid::Uuid;

use super::die::DieFace;
use super::events::{
    GameEvent, GameEventKind, OutcomeReceived, RollBegun, RoundResolved, SessionStarted,
};
use super::filter;
use crate::config::GameConfig;

/// Session phase state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Created, not yet accepting rolls.
    Idle,
    /// Waiting for the player to roll.
    AwaitingRoll,
    /// A roll is in progress (with or without its outcome).
    Resolving,
    /// Every round has been rolled.
    Complete,
}

impl RoundPhase {
    /// Returns the phase as a snake-case string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingRoll => "awaiting_roll",
            Self::Resolving => "resolving",
            Self::Complete => "complete",
        }
    }
}

/// The roll currently in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PendingRoll {
    pub started_at: DateTime<Utc>,
    pub outcome: Option<(DieFace, DateTime<Utc>)>,
}

/// How far a submitted outcome got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollProgress {
    /// The minimum rolling time had already passed; the round is resolved.
    Resolved,
    /// The round resolves once `remaining` has elapsed.
    Settling {
        /// Time left before the roll may resolve.
        remaining: std::time::Duration,
    },
}

/// Where the map should fly to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapTarget {
    /// Focus, or the configured default center before any focus exists.
    pub center: LatLng,
    /// Zoom level for the current stage.
    pub zoom: u8,
    /// Zoom stage index (completed rounds).
    pub stage: usize,
}

/// The aggregate root for one game session.
///
/// Every accepted command records exactly one event and applies it at once,
/// so readers only ever observe committed state. `uncommitted_events` holds
/// the events not yet handed to subscribers.
#[derive(Debug)]
pub struct GameSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    catalog: Arc<RegionCatalog>,
    config: GameConfig,
    /// Current phase.
    pub(crate) phase: RoundPhase,
    /// Roll in progress (set while `Resolving`).
    pub(crate) pending: Option<PendingRoll>,
    /// Committed outcomes, one per completed round.
    pub(crate) outcomes: Vec<DieFace>,
    /// Catalog indices of the current survivors.
    pub(crate) survivors: Vec<usize>,
    /// Current map focus.
    pub(crate) focus: Option<LatLng>,
    uncommitted_events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an idle session over `catalog`; every region starts as a survivor.
    #[must_use]
    pub fn new(id: Uuid, catalog: Arc<RegionCatalog>, config: GameConfig) -> Self {
        let survivors = (0..catalog.len()).collect();
        Self {
            id,
            version: 0,
            catalog,
            config,
            phase: RoundPhase::Idle,
            pending: None,
            outcomes: Vec::new(),
            survivors,
            focus: None,
            uncommitted_events: Vec::new(),
        }
    }

    fn record(&mut self, kind: GameEventKind, correlation_id: Uuid, occurred_at: DateTime<Utc>) {
        let event = GameEvent {
            metadata: EventMetadata::caused_by(
                kind.type_name(),
                self.id,
                self.version + 1,
                correlation_id,
                occurred_at,
            ),
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    /// Moves an idle session to `AwaitingRoll`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DoubleSubmission` if already started.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.phase != RoundPhase::Idle {
            return Err(DomainError::DoubleSubmission(
                "session has already started".to_owned(),
            ));
        }

        let kind = GameEventKind::SessionStarted(SessionStarted {
            session_id: self.id,
            region_count: self.catalog.len(),
        });
        self.record(kind, correlation_id, clock.now());
        Ok(())
    }

    /// Enters the rolling state for the next round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DoubleSubmission` if a roll is already in
    /// progress or every round has been rolled, and
    /// `DomainError::Validation` if the session has not started.
    pub fn begin_roll(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        match self.phase {
            RoundPhase::AwaitingRoll => {}
            RoundPhase::Resolving => {
                return Err(DomainError::DoubleSubmission(
                    "a roll is already in progress".to_owned(),
                ));
            }
            RoundPhase::Complete => {
                return Err(DomainError::DoubleSubmission(
                    "every round has been rolled".to_owned(),
                ));
            }
            RoundPhase::Idle => {
                return Err(DomainError::Validation(
                    "session has not started".to_owned(),
                ));
            }
        }

        let now = clock.now();
        let kind = GameEventKind::RollBegun(RollBegun {
            session_id: self.id,
            round: self.current_round_number(),
            started_at: now,
        });
        self.record(kind, correlation_id, now);
        Ok(())
    }

    /// Accepts the finished die value for the roll in progress.
    ///
    /// The round resolves immediately if the minimum rolling time has
    /// already passed; otherwise the caller must call
    /// [`GameSession::complete_roll`] once the returned time has elapsed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DoubleSubmission` if no roll is waiting for an
    /// outcome, and `DomainError::InvalidOutcome` if `value` is not a whole
    /// number in `1..=6`. Neither changes the session.
    pub fn submit_outcome<V>(
        &mut self,
        value: V,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<RollProgress, DomainError>
    where
        DieFace: TryFrom<V, Error = DomainError>,
    {
        let started_at = match self.pending {
            Some(PendingRoll {
                started_at,
                outcome: None,
            }) => started_at,
            Some(PendingRoll {
                outcome: Some(_), ..
            }) => {
                return Err(DomainError::DoubleSubmission(
                    "the roll in progress already has its outcome".to_owned(),
                ));
            }
            None => {
                return Err(DomainError::DoubleSubmission(
                    "no roll is in progress".to_owned(),
                ));
            }
        };
        let face = DieFace::try_from(value)?;

        let now = clock.now();
        let settles_at = started_at + self.config.min_roll_duration;
        let kind = GameEventKind::OutcomeReceived(OutcomeReceived {
            session_id: self.id,
            round: self.current_round_number(),
            face,
            settles_at,
        });
        self.record(kind, correlation_id, now);

        if let Some(remaining) = clock.remaining_until(settles_at) {
            return Ok(RollProgress::Settling {
                remaining: remaining.to_std().unwrap_or_default(),
            });
        }
        self.complete_roll(correlation_id, clock)?;
        Ok(RollProgress::Resolved)
    }

    /// Commits the pending outcome and recomputes survivors and focus.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RollSettling` if the minimum rolling time has
    /// not elapsed, and `DomainError::DoubleSubmission` if no outcome is
    /// waiting.
    pub fn complete_roll(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let Some(PendingRoll {
            outcome: Some((face, settles_at)),
            ..
        }) = self.pending
        else {
            return Err(DomainError::DoubleSubmission(
                "no outcome is waiting to resolve".to_owned(),
            ));
        };

        if let Some(remaining) = clock.remaining_until(settles_at) {
            let micros = remaining.num_microseconds().unwrap_or(i64::MAX);
            return Err(DomainError::RollSettling {
                remaining_ms: micros.saturating_add(999) / 1_000,
            });
        }
        let now = clock.now();

        let mut outcomes = self.outcomes.clone();
        outcomes.push(face);
        let narrowing = filter::narrow(&self.catalog, &outcomes, self.focus);

        let kind = GameEventKind::RoundResolved(RoundResolved {
            session_id: self.id,
            round: outcomes.len(),
            face,
            survivor_count: narrowing.survivors.len(),
            focus: narrowing.focus,
        });
        self.record(kind, correlation_id, now);
        Ok(())
    }

    fn current_round_number(&self) -> usize {
        self.outcomes.len() + 1
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Number of completed rounds.
    #[must_use]
    pub fn round(&self) -> usize {
        self.outcomes.len()
    }

    /// Committed outcomes in round order.
    #[must_use]
    pub fn outcomes(&self) -> &[DieFace] {
        &self.outcomes
    }

    /// Current survivors in catalog order.
    #[must_use]
    pub fn survivors(&self) -> Vec<&Region> {
        self.survivors
            .iter()
            .filter_map(|&index| self.catalog.get(index))
            .collect()
    }

    /// Current map focus.
    #[must_use]
    pub fn focus(&self) -> Option<LatLng> {
        self.focus
    }

    /// Whether the player may roll now.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.phase == RoundPhase::AwaitingRoll && self.round() < ROUND_COUNT
    }

    /// Zoom stage index; equal to the number of completed rounds.
    #[must_use]
    pub fn zoom_stage(&self) -> usize {
        self.round()
    }

    /// Current map target.
    #[must_use]
    pub fn map_target(&self) -> MapTarget {
        let stage = self.zoom_stage();
        MapTarget {
            center: self.focus.unwrap_or(self.config.default_center),
            zoom: self.config.zoom_for_stage(stage),
            stage,
        }
    }

    /// Earliest instant the roll in progress may resolve, once its outcome is known.
    #[must_use]
    pub fn settles_at(&self) -> Option<DateTime<Utc>> {
        self.pending
            .and_then(|pending| pending.outcome)
            .map(|(_, settles_at)| settles_at)
    }

    /// Survivor names joined with the configured separator.
    #[must_use]
    pub fn survivor_names(&self) -> String {
        self.survivors()
            .iter()
            .map(|region| region.name())
            .collect::<Vec<_>>()
            .join(&self.config.name_separator)
    }

    /// The catalog this session narrows.
    #[must_use]
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl AggregateRoot for GameSession {
    type Event = GameEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            GameEventKind::SessionStarted(_) => {
                self.phase = RoundPhase::AwaitingRoll;
            }
            GameEventKind::RollBegun(payload) => {
                self.phase = RoundPhase::Resolving;
                self.pending = Some(PendingRoll {
                    started_at: payload.started_at,
                    outcome: None,
                });
            }
            GameEventKind::OutcomeReceived(payload) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.outcome = Some((payload.face, payload.settles_at));
                }
            }
            GameEventKind::RoundResolved(payload) => {
                self.outcomes.push(payload.face);
                let narrowing = filter::narrow(&self.catalog, &self.outcomes, self.focus);
                self.survivors = narrowing.survivors;
                self.focus = narrowing.focus;
                self.pending = None;
                self.phase = if self.outcomes.len() >= ROUND_COUNT {
                    RoundPhase::Complete
                } else {
                    RoundPhase::AwaitingRoll
                };
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
