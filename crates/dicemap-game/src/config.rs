//! Game configuration.

use chrono::Duration;
use dicemap_catalog::ROUND_COUNT;
use dicemap_core::error::DomainError;
use dicemap_geometry::LatLng;

/// Minimum time a roll stays in the rolling state, in milliseconds.
pub const DEFAULT_MIN_ROLL_MS: i64 = 2_000;
/// Zoom level shown after each completed round.
pub const DEFAULT_ZOOM_LEVELS: [u8; ROUND_COUNT] = [5, 7, 9];
/// Zoom level before any round has completed.
pub const DEFAULT_BASE_ZOOM: u8 = 5;

const MAX_MIN_ROLL_MS: i64 = 60_000;

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Minimum time between entering the rolling state and resolving it.
    pub min_roll_duration: Duration,
    /// Zoom level per completed round.
    pub zoom_levels: [u8; ROUND_COUNT],
    /// Zoom level before the first round resolves.
    pub base_zoom: u8,
    /// Map center used until a survivor provides one.
    pub default_center: LatLng,
    /// Separator used when copying survivor names.
    pub name_separator: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_roll_duration: Duration::milliseconds(DEFAULT_MIN_ROLL_MS),
            zoom_levels: DEFAULT_ZOOM_LEVELS,
            base_zoom: DEFAULT_BASE_ZOOM,
            default_center: LatLng::new(36.5, 138.0),
            name_separator: ", ".to_owned(),
        }
    }
}

impl GameConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, falling back to defaults.
    ///
    /// Recognised keys: `DICEMAP_MIN_ROLL_MS`, `DICEMAP_ZOOM_LEVELS`
    /// (three comma-separated integers), `DICEMAP_DEFAULT_CENTER`
    /// (`lat,lon`) and `DICEMAP_NAME_SEPARATOR`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a value is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("DICEMAP_MIN_ROLL_MS") {
            let millis: i64 = raw.trim().parse().map_err(|e| {
                DomainError::Validation(format!("DICEMAP_MIN_ROLL_MS must be an integer: {e}"))
            })?;
            if !(0..=MAX_MIN_ROLL_MS).contains(&millis) {
                return Err(DomainError::Validation(format!(
                    "DICEMAP_MIN_ROLL_MS must be within 0..={MAX_MIN_ROLL_MS}"
                )));
            }
            config.min_roll_duration = Duration::milliseconds(millis);
        }

        if let Some(raw) = lookup("DICEMAP_ZOOM_LEVELS") {
            let levels = parse_list::<u8>(&raw, "DICEMAP_ZOOM_LEVELS")?;
            config.zoom_levels = levels.try_into().map_err(|_| {
                DomainError::Validation(format!(
                    "DICEMAP_ZOOM_LEVELS must list exactly {ROUND_COUNT} levels"
                ))
            })?;
        }

        if let Some(raw) = lookup("DICEMAP_DEFAULT_CENTER") {
            match parse_list::<f64>(&raw, "DICEMAP_DEFAULT_CENTER")?.as_slice() {
                &[lat, lon] => config.default_center = LatLng::new(lat, lon),
                _ => {
                    return Err(DomainError::Validation(
                        "DICEMAP_DEFAULT_CENTER must be `lat,lon`".to_owned(),
                    ));
                }
            }
        }

        if let Some(separator) = lookup("DICEMAP_NAME_SEPARATOR") {
            config.name_separator = separator;
        }

        Ok(config)
    }

    /// Zoom level for a zoom stage (the number of completed rounds).
    #[must_use]
    pub fn zoom_for_stage(&self, stage: usize) -> u8 {
        stage
            .checked_sub(1)
            .and_then(|index| self.zoom_levels.get(index))
            .copied()
            .unwrap_or(self.base_zoom)
    }
}

fn parse_list<T: std::str::FromStr>(raw: &str, key: &str) -> Result<Vec<T>, DomainError>
where
    T::Err: std::fmt::Display,
{
    raw.split(',')
        .map(|item| {
            item.trim()
                .parse::<T>()
                .map_err(|e| DomainError::Validation(format!("{key} has a bad entry {item:?}: {e}")))
        })
        .collect()
}
