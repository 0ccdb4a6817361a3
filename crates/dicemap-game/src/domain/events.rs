//! Domain events for the game context.

use chrono::{DateTime, Utc};
use dicemap_core::event::{DomainEvent, EventMetadata};
use dicemap_geometry::LatLng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::die::DieFace;

/// Emitted when a session leaves `Idle` and waits for its first roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Number of regions in play.
    pub region_count: usize,
}

/// Emitted when the player starts rolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollBegun {
    /// The session identifier.
    pub session_id: Uuid,
    /// The round being rolled (1-based).
    pub round: usize,
    /// When the rolling state was entered.
    pub started_at: DateTime<Utc>,
}

/// Emitted when a valid outcome arrives for the roll in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReceived {
    /// The session identifier.
    pub session_id: Uuid,
    /// The round being rolled (1-based).
    pub round: usize,
    /// The die face.
    pub face: DieFace,
    /// Earliest instant the round may resolve.
    pub settles_at: DateTime<Utc>,
}

/// Emitted when a round's outcome is committed and survivors recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResolved {
    /// The session identifier.
    pub session_id: Uuid,
    /// The round that resolved (1-based).
    pub round: usize,
    /// The committed die face.
    pub face: DieFace,
    /// Regions still standing.
    pub survivor_count: usize,
    /// Map focus after the round.
    pub focus: Option<LatLng>,
}

/// Event payload variants for the game context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// The session is ready for its first roll.
    SessionStarted(SessionStarted),
    /// A roll is in progress.
    RollBegun(RollBegun),
    /// The roll in progress has its outcome.
    OutcomeReceived(OutcomeReceived),
    /// The round resolved.
    RoundResolved(RoundResolved),
}

impl GameEventKind {
    /// The routing name of this event kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => "game.session_started",
            Self::RollBegun(_) => "game.roll_begun",
            Self::OutcomeReceived(_) => "game.outcome_received",
            Self::RoundResolved(_) => "game.round_resolved",
        }
    }
}

/// Domain event envelope for the game context.
#[derive(Debug, Clone)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Derived Serialize into a Value cannot fail; Null is never produced.
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use dicemap_core::clock::Clock;
    use dicemap_test_support::fixed_clock;

    use super::*;

    fn event(kind: GameEventKind) -> GameEvent {
        GameEvent {
            metadata: EventMetadata::caused_by(
                kind.type_name(),
                Uuid::new_v4(),
                1,
                Uuid::new_v4(),
                fixed_clock().now(),
            ),
            kind,
        }
    }

    #[test]
    fn test_payload_round_trips_round_resolved() {
        let kind = GameEventKind::RoundResolved(RoundResolved {
            session_id: Uuid::new_v4(),
            round: 2,
            face: DieFace::try_from(5_u8).unwrap(),
            survivor_count: 4,
            focus: Some(LatLng::new(35.5, 139.5)),
        });
        let event = event(kind.clone());

        let payload = event.to_payload();
        assert_eq!(payload["RoundResolved"]["face"], 5);
        assert_eq!(payload["RoundResolved"]["survivor_count"], 4);

        let decoded: GameEventKind = serde_json::from_value(payload).unwrap();
        assert_eq!(decoded, kind);
    }

    #[test]
    fn test_payload_round_trips_outcome_received() {
        let settles_at = fixed_clock().now() + chrono::Duration::milliseconds(2_000);
        let kind = GameEventKind::OutcomeReceived(OutcomeReceived {
            session_id: Uuid::new_v4(),
            round: 1,
            face: DieFace::try_from(3_u8).unwrap(),
            settles_at,
        });

        let payload = event(kind.clone()).to_payload();
        let decoded: GameEventKind = serde_json::from_value(payload).unwrap();

        assert_eq!(decoded, kind);
    }

    #[test]
    fn test_payload_with_bad_face_does_not_decode() {
        let mut payload = event(GameEventKind::RoundResolved(RoundResolved {
            session_id: Uuid::new_v4(),
            round: 1,
            face: DieFace::try_from(1_u8).unwrap(),
            survivor_count: 0,
            focus: None,
        }))
        .to_payload();
        payload["RoundResolved"]["face"] = serde_json::json!(7);

        assert!(serde_json::from_value::<GameEventKind>(payload).is_err());
    }

    #[test]
    fn test_event_type_matches_metadata() {
        let event = event(GameEventKind::SessionStarted(SessionStarted {
            session_id: Uuid::new_v4(),
            region_count: 3,
        }));

        assert_eq!(event.event_type(), "game.session_started");
        assert_eq!(event.metadata().event_type, event.event_type());
    }
}
