//! Builds the region catalog from raw rows.

use std::collections::HashMap;

use dicemap_geometry::{try_parse_point, try_parse_polygon};
use tracing::{debug, info};

use crate::domain::columns::CatalogColumns;
use crate::domain::region::{ROUND_COUNT, Region};

const PREFECTURE_SEPARATOR: char = '・';

/// The read-only list of regions a game narrows down, in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Wraps already-built regions.
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Builds a catalog from column-name → value rows.
    ///
    /// Rows whose geometry does not yield at least one ring are dropped.
    /// A missing or unparsable center point only leaves `center` unset.
    pub fn from_rows<'a, I>(rows: I, columns: &CatalogColumns) -> Self
    where
        I: IntoIterator<Item = &'a HashMap<String, String>>,
    {
        let mut regions = Vec::new();
        let mut dropped = 0_usize;

        for row in rows {
            match region_from_row(row, columns) {
                Some(region) => regions.push(region),
                None => dropped += 1,
            }
        }

        info!(kept = regions.len(), dropped, "region catalog built");
        Self { regions }
    }

    /// All regions, in source order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Derives a region from one row, or `None` if it has no usable geometry.
fn region_from_row(row: &HashMap<String, String>, columns: &CatalogColumns) -> Option<Region> {
    let name = cell(row, &columns.name).unwrap_or_default();

    let polygon = match try_parse_polygon(cell(row, &columns.geometry).unwrap_or_default()) {
        Ok(polygon) => polygon,
        Err(err) => {
            debug!(region = name, error = %err, "dropping row without usable polygon geometry");
            return None;
        }
    };

    let center = cell(row, &columns.center).and_then(|text| match try_parse_point(text) {
        Ok(center) => Some(center),
        Err(err) => {
            debug!(region = name, error = %err, "ignoring unparsable center point");
            None
        }
    });

    let mut round_keys = [None; ROUND_COUNT];
    for (slot, column) in round_keys.iter_mut().zip(&columns.round_keys) {
        *slot = cell(row, column).and_then(|raw| numeric_key(name, column, raw));
    }

    let prefecture = cell(row, &columns.prefecture).map(str::to_owned);
    let prefectures = cell(row, &columns.prefectures)
        .map(|list| {
            list.split(PREFECTURE_SEPARATOR)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Region::new(name, polygon, center, round_keys)
        .ok()
        .map(|region| region.with_prefectures(prefecture, prefectures))
}

/// A trimmed, non-blank cell value.
fn cell<'r>(row: &'r HashMap<String, String>, column: &str) -> Option<&'r str> {
    row.get(column)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn numeric_key(region: &str, column: &str, raw: &str) -> Option<f64> {
    let parsed = raw.parse::<f64>().ok().filter(|value| value.is_finite());
    if parsed.is_none() {
        debug!(region, column, value = raw, "round key is not numeric; leaving it unset");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use dicemap_geometry::LatLng;
    use dicemap_test_support::{RowBuilder, multipolygon_wkt};

    use super::*;

    fn build(rows: &[HashMap<String, String>]) -> RegionCatalog {
        RegionCatalog::from_rows(rows, &CatalogColumns::default())
    }

    #[test]
    fn test_from_rows_reads_all_fields() {
        let rows = vec![
            RowBuilder::named("Kanto")
                .center(139.5, 35.75)
                .square(139.0, 35.0)
                .round_key(1, "3")
                .round_key(2, " 5 ")
                .cell("N03_001", "東京都")
                .cell("prefectures", "東京都・神奈川県・")
                .build(),
        ];

        let catalog = build(&rows);

        assert_eq!(catalog.len(), 1);
        let region = &catalog.regions()[0];
        assert_eq!(region.name(), "Kanto");
        assert_eq!(region.center(), Some(LatLng::new(35.75, 139.5)));
        assert_eq!(region.polygon().len(), 1);
        assert_eq!(region.polygon()[0][0], LatLng::new(35.0, 139.0));
        assert_eq!(region.round_key(1), Some(3.0));
        assert_eq!(region.round_key(2), Some(5.0));
        assert_eq!(region.round_key(3), None);
        assert_eq!(region.prefecture(), Some("東京都"));
        assert_eq!(region.prefectures(), ["東京都", "神奈川県"]);
    }

    #[test]
    fn test_from_rows_drops_rows_without_polygon() {
        let rows = vec![
            RowBuilder::named("NoGeometry").center(1.0, 2.0).build(),
            RowBuilder::named("BadGeometry").geometry("POLYGON ((x y))").build(),
            RowBuilder::named("PointGeometry").geometry("POINT (1 2)").build(),
            RowBuilder::named("Kept").square(0.0, 0.0).build(),
        ];

        let catalog = build(&rows);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.regions()[0].name(), "Kept");
    }

    #[test]
    fn test_from_rows_preserves_order_and_multipolygons() {
        let rows = vec![
            RowBuilder::named("B").square(5.0, 5.0).build(),
            RowBuilder::named("A")
                .geometry(&multipolygon_wkt(&[(0.0, 0.0), (2.0, 2.0), (4.0, 4.0)]))
                .build(),
        ];

        let catalog = build(&rows);

        let names: Vec<&str> = catalog.regions().iter().map(Region::name).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(catalog.regions()[1].polygon().len(), 3);
    }

    #[test]
    fn test_from_rows_keeps_region_with_bad_center() {
        let rows = vec![
            RowBuilder::named("Drifting")
                .cell("Center_Coord", "POINT (east north)")
                .square(0.0, 0.0)
                .build(),
        ];

        let catalog = build(&rows);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.regions()[0].center(), None);
    }

    #[test]
    fn test_from_rows_blank_and_non_numeric_keys_are_unset() {
        let rows = vec![
            RowBuilder::named("Sparse")
                .square(0.0, 0.0)
                .round_key(1, "")
                .round_key(2, "abc")
                .round_key(3, "4.0")
                .build(),
        ];

        let catalog = build(&rows);
        let region = &catalog.regions()[0];

        assert_eq!(region.round_key(1), None);
        assert_eq!(region.round_key(2), None);
        assert_eq!(region.round_key(3), Some(4.0));
    }

    #[test]
    fn test_from_rows_missing_name_defaults_to_empty() {
        let rows = vec![RowBuilder::default().square(0.0, 0.0).build()];
        assert_eq!(build(&rows).regions()[0].name(), "");
    }

    #[test]
    fn test_from_rows_honours_custom_columns() {
        let columns = CatalogColumns {
            name: "label".to_owned(),
            geometry: "wkt".to_owned(),
            round_keys: ["r1".to_owned(), "r2".to_owned(), "r3".to_owned()],
            ..CatalogColumns::default()
        };
        let rows = vec![
            RowBuilder::default()
                .cell("label", "Custom")
                .cell("wkt", "POLYGON ((1 1, 2 2))")
                .cell("r2", "6")
                .build(),
        ];

        let catalog = RegionCatalog::from_rows(&rows, &columns);

        assert_eq!(catalog.regions()[0].name(), "Custom");
        assert_eq!(catalog.regions()[0].round_key(2), Some(6.0));
    }

    #[test]
    fn test_from_rows_is_idempotent() {
        let rows = vec![
            RowBuilder::named("One").square(0.0, 0.0).round_key(1, "1").build(),
            RowBuilder::named("Dropped").build(),
            RowBuilder::named("Two").center(3.0, 4.0).square(3.0, 4.0).build(),
        ];

        assert_eq!(build(&rows), build(&rows));
    }

    #[test]
    fn test_empty_input_builds_empty_catalog() {
        let catalog = build(&[]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.get(0), None);
    }
}
