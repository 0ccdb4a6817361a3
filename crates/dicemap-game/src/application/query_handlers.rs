//! Query handlers for the game context.
//!
//! Views are plain copies of committed session state, safe to hand to a
//! presentation layer.

use dicemap_catalog::{ROUND_COUNT, Region};
use dicemap_core::aggregate::AggregateRoot;
use dicemap_geometry::LatLng;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{GameSession, MapTarget, RoundPhase};

/// Read-only view of a surviving region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionView {
    /// Display name.
    pub name: String,
    /// Polygon rings as `[lat, lon]` pairs, ready for a map widget.
    pub polygon: Vec<Vec<[f64; 2]>>,
    /// Center point, if known.
    pub center: Option<LatLng>,
    /// Prefecture the region belongs to.
    pub prefecture: Option<String>,
    /// Prefectures the region spans.
    pub prefectures: Vec<String>,
}

impl From<&Region> for RegionView {
    fn from(region: &Region) -> Self {
        Self {
            name: region.name().to_owned(),
            polygon: region
                .polygon()
                .iter()
                .map(|ring| ring.iter().map(|point| point.to_array()).collect())
                .collect(),
            center: region.center(),
            prefecture: region.prefecture().map(str::to_owned),
            prefectures: region.prefectures().to_vec(),
        }
    }
}

/// Read-only view of a game session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current phase.
    pub phase: RoundPhase,
    /// Completed rounds.
    pub round: usize,
    /// Total rounds in a game.
    pub max_rounds: usize,
    /// Committed die faces in round order.
    pub outcomes: Vec<u8>,
    /// Whether the player may roll now.
    pub can_roll: bool,
    /// Surviving regions in catalog order.
    pub survivors: Vec<RegionView>,
    /// Survivor names joined for copying.
    pub survivor_names: String,
    /// Current map focus.
    pub focus: Option<LatLng>,
    /// Where the map should fly to.
    pub map_target: MapTarget,
    /// Current version (event count).
    pub version: i64,
}

/// Builds the read-only view of `session`.
#[must_use]
pub fn get_session_view(session: &GameSession) -> SessionView {
    SessionView {
        session_id: session.id,
        phase: session.phase(),
        round: session.round(),
        max_rounds: ROUND_COUNT,
        outcomes: session.outcomes().iter().map(|face| face.get()).collect(),
        can_roll: session.can_roll(),
        survivors: session
            .survivors()
            .into_iter()
            .map(RegionView::from)
            .collect(),
        survivor_names: session.survivor_names(),
        focus: session.focus(),
        map_target: session.map_target(),
        version: session.version(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dicemap_catalog::{CatalogColumns, RegionCatalog};
    use dicemap_test_support::{ManualClock, RowBuilder, fixed_clock};

    use super::*;
    use crate::GameConfig;

    fn catalog() -> Arc<RegionCatalog> {
        let rows = vec![
            RowBuilder::named("Alpha")
                .square(139.0, 35.0)
                .center(139.5, 35.5)
                .round_key(1, "2")
                .cell("N03_001", "東京都")
                .cell("prefectures", "東京都・神奈川県")
                .build(),
            RowBuilder::named("Beta")
                .square(140.0, 36.0)
                .round_key(1, "4")
                .build(),
        ];
        Arc::new(RegionCatalog::from_rows(&rows, &CatalogColumns::default()))
    }

    #[test]
    fn test_view_of_fresh_session() {
        let id = Uuid::new_v4();
        let session = GameSession::new(id, catalog(), GameConfig::default());

        let view = get_session_view(&session);

        assert_eq!(view.session_id, id);
        assert_eq!(view.phase, RoundPhase::Idle);
        assert_eq!(view.round, 0);
        assert_eq!(view.max_rounds, 3);
        assert!(view.outcomes.is_empty());
        assert!(!view.can_roll);
        assert_eq!(view.survivors.len(), 2);
        assert_eq!(view.survivor_names, "Alpha, Beta");
        assert_eq!(view.focus, None);
        assert_eq!(view.map_target.center, LatLng::new(36.5, 138.0));
        assert_eq!(view.version, 0);
    }

    #[test]
    fn test_region_view_uses_lat_lon_pairs() {
        let catalog = catalog();
        let view = RegionView::from(&catalog.regions()[0]);

        assert_eq!(view.name, "Alpha");
        assert_eq!(view.polygon[0][0], [35.0, 139.0]);
        assert_eq!(view.polygon[0][1], [35.0, 140.0]);
        assert_eq!(view.center, Some(LatLng::new(35.5, 139.5)));
        assert_eq!(view.prefecture.as_deref(), Some("東京都"));
        assert_eq!(view.prefectures, ["東京都", "神奈川県"]);
    }

    #[test]
    fn test_region_view_without_prefectures() {
        let catalog = catalog();
        let view = RegionView::from(&catalog.regions()[1]);

        assert_eq!(view.prefecture, None);
        assert!(view.prefectures.is_empty());
    }

    #[test]
    fn test_view_after_resolved_round() {
        let clock = ManualClock::starting_fixed();
        let mut session = GameSession::new(Uuid::new_v4(), catalog(), GameConfig::default());
        session.start(Uuid::new_v4(), &fixed_clock()).unwrap();
        session.begin_roll(Uuid::new_v4(), &clock).unwrap();
        clock.advance_millis(2_000);
        session.submit_outcome(2_i64, Uuid::new_v4(), &clock).unwrap();

        let view = get_session_view(&session);

        assert_eq!(view.phase, RoundPhase::AwaitingRoll);
        assert_eq!(view.round, 1);
        assert_eq!(view.outcomes, vec![2]);
        assert!(view.can_roll);
        assert_eq!(view.survivor_names, "Alpha");
        assert_eq!(view.focus, Some(LatLng::new(35.5, 139.5)));
        assert_eq!(view.map_target.zoom, 5);
        assert_eq!(view.map_target.stage, 1);
        assert_eq!(view.version, 4);
    }

    #[test]
    fn test_view_serializes_phase_in_snake_case() {
        let session = GameSession::new(Uuid::new_v4(), catalog(), GameConfig::default());
        let json = serde_json::to_value(get_session_view(&session)).unwrap();

        assert_eq!(json["phase"], "idle");
        assert_eq!(json["max_rounds"], 3);
    }
}
