//! The region entity.

use dicemap_core::error::DomainError;
use dicemap_geometry::{LatLng, Ring};
use serde::Serialize;

/// Number of rounds a game has, and of round keys a region carries.
pub const ROUND_COUNT: usize = 3;

/// A named geographic region taking part in the game.
///
/// Immutable once built; the polygon always holds at least one ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    name: String,
    polygon: Vec<Ring>,
    center: Option<LatLng>,
    round_keys: [Option<f64>; ROUND_COUNT],
    prefecture: Option<String>,
    prefectures: Vec<String>,
}

impl Region {
    /// Creates a region.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `polygon` has no non-empty ring.
    pub fn new(
        name: impl Into<String>,
        polygon: Vec<Ring>,
        center: Option<LatLng>,
        round_keys: [Option<f64>; ROUND_COUNT],
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if polygon.iter().all(Vec::is_empty) {
            return Err(DomainError::Validation(format!(
                "region {name:?} has no polygon geometry"
            )));
        }
        Ok(Self {
            name,
            polygon,
            center,
            round_keys,
            prefecture: None,
            prefectures: Vec::new(),
        })
    }

    /// Attaches the descriptive prefecture attributes.
    #[must_use]
    pub fn with_prefectures(mut self, prefecture: Option<String>, prefectures: Vec<String>) -> Self {
        self.prefecture = prefecture;
        self.prefectures = prefectures;
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Polygon rings, latitude-first.
    #[must_use]
    pub fn polygon(&self) -> &[Ring] {
        &self.polygon
    }

    /// Representative point used to re-center the map.
    #[must_use]
    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    /// The die face this region matches in `round` (1-based), if any.
    #[must_use]
    pub fn round_key(&self, round: usize) -> Option<f64> {
        round
            .checked_sub(1)
            .and_then(|index| self.round_keys.get(index))
            .copied()
            .flatten()
    }

    /// Whether this region survives `round` (1-based) when the die shows `face`.
    ///
    /// An absent key never matches.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches_round(&self, round: usize, face: u8) -> bool {
        self.round_key(round)
            .is_some_and(|key| key == f64::from(face))
    }

    /// Prefecture the region belongs to.
    #[must_use]
    pub fn prefecture(&self) -> Option<&str> {
        self.prefecture.as_deref()
    }

    /// Prefectures the region spans.
    #[must_use]
    pub fn prefectures(&self) -> &[String] {
        &self.prefectures
    }
}
