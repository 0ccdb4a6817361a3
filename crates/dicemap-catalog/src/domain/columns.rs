//! Column-name configuration for raw region rows.

use crate::domain::region::ROUND_COUNT;

/// Names of the CSV columns a region row is read from.
///
/// The defaults match the region export the game ships with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumns {
    /// Display name column.
    pub name: String,
    /// `POINT (lon lat)` column used as the region's representative point.
    pub center: String,
    /// `POLYGON`/`MULTIPOLYGON` column.
    pub geometry: String,
    /// One column per round, holding the die face the region matches.
    pub round_keys: [String; ROUND_COUNT],
    /// Prefecture the region belongs to.
    pub prefecture: String,
    /// `・`-separated list of prefectures the region spans.
    pub prefectures: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            name: "region_name".to_owned(),
            center: "Center_Coord".to_owned(),
            geometry: "geometry".to_owned(),
            round_keys: ["area1".to_owned(), "area2".to_owned(), "area3".to_owned()],
            prefecture: "N03_001".to_owned(),
            prefectures: "prefectures".to_owned(),
        }
    }
}
