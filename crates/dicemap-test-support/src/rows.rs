//! Raw CSV-row fixtures in the shape the region catalog consumes.

use std::collections::HashMap;

/// Builds a column-name → value row using the region dataset's column names.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    cells: HashMap<String, String>,
}

impl RowBuilder {
    /// Starts a row for a region called `name`.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::default().cell("region_name", name)
    }

    /// Sets an arbitrary column.
    #[must_use]
    pub fn cell(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_owned(), value.to_owned());
        self
    }

    /// Sets the `Center_Coord` column to a `POINT (lon lat)` string.
    #[must_use]
    pub fn center(self, lon: f64, lat: f64) -> Self {
        self.cell("Center_Coord", &point_wkt(lon, lat))
    }

    /// Sets the `geometry` column to a unit square anchored at `(lon, lat)`.
    #[must_use]
    pub fn square(self, lon: f64, lat: f64) -> Self {
        self.cell("geometry", &square_polygon_wkt(lon, lat))
    }

    /// Sets the `geometry` column verbatim.
    #[must_use]
    pub fn geometry(self, wkt: &str) -> Self {
        self.cell("geometry", wkt)
    }

    /// Sets round key `round` (1-based) to `value`.
    #[must_use]
    pub fn round_key(self, round: usize, value: &str) -> Self {
        self.cell(&format!("area{round}"), value)
    }

    /// Finishes the row.
    #[must_use]
    pub fn build(self) -> HashMap<String, String> {
        self.cells
    }
}

/// Formats a `POINT (lon lat)` string.
#[must_use]
pub fn point_wkt(lon: f64, lat: f64) -> String {
    format!("POINT ({lon} {lat})")
}

fn square_ring(lon: f64, lat: f64) -> String {
    format!(
        "{lon} {lat}, {} {lat}, {} {}, {lon} {}, {lon} {lat}",
        lon + 1.0,
        lon + 1.0,
        lat + 1.0,
        lat + 1.0
    )
}

/// Formats a closed unit-square `POLYGON ((...))` anchored at `(lon, lat)`.
#[must_use]
pub fn square_polygon_wkt(lon: f64, lat: f64) -> String {
    format!("POLYGON (({}))", square_ring(lon, lat))
}

/// Formats a `MULTIPOLYGON` with one unit square per anchor.
#[must_use]
pub fn multipolygon_wkt(anchors: &[(f64, f64)]) -> String {
    let groups: Vec<String> = anchors
        .iter()
        .map(|&(lon, lat)| format!("(({}))", square_ring(lon, lat)))
        .collect();
    format!("MULTIPOLYGON ({})", groups.join(", "))
}
