//! Coordinate types.

use serde::{Deserialize, Serialize};

/// A geographic position stored latitude-first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLng {
    /// Creates a position from latitude and longitude.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a position from source-order (`lon lat`) components.
    ///
    /// This is the only place the WKT axis order is swapped.
    #[must_use]
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `[lat, lon]`, the order map widgets expect.
    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Formats the position back into `POINT (lon lat)` text.
    #[must_use]
    pub fn to_point_wkt(self) -> String {
        format!("POINT ({} {})", self.lon, self.lat)
    }
}

/// One closed polygon boundary, vertices in source order.
pub type Ring = Vec<LatLng>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lon_lat_swaps_axes() {
        let pos = LatLng::from_lon_lat(139.7, 35.6);
        assert!((pos.lat - 35.6).abs() < f64::EPSILON);
        assert!((pos.lon - 139.7).abs() < f64::EPSILON);
        assert_eq!(pos.to_array(), [35.6, 139.7]);
    }

    #[test]
    fn test_to_point_wkt_writes_lon_first() {
        assert_eq!(
            LatLng::new(35.5, 139.25).to_point_wkt(),
            "POINT (139.25 35.5)"
        );
    }
}
