//! Property-based tests for the WKT-subset parsers.

#![allow(clippy::unwrap_used)]

use dicemap_geometry::{LatLng, parse_coordinate_list, parse_point, parse_polygon};
use dicemap_test_support::multipolygon_wkt;
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    -180.0f64..180.0
}

fn lon_lat_pair() -> impl Strategy<Value = (f64, f64)> {
    (coordinate(), -90.0f64..90.0)
}

/// A pair text that `parse_coordinate_list` must drop.
fn malformed_pair() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("abc def".to_owned()),
        Just("1".to_owned()),
        Just("1 2 3".to_owned()),
        Just(String::new()),
        Just("NaN 4".to_owned()),
    ]
}

proptest! {
    /// Parsing `POINT (x y)` yields `(y, x)`, and re-serializing round-trips.
    #[test]
    fn prop_point_axis_swap_and_round_trip((lon, lat) in lon_lat_pair()) {
        let parsed = parse_point(&format!("POINT ({lon} {lat})")).unwrap();
        prop_assert_eq!(parsed, LatLng::new(lat, lon));
        prop_assert_eq!(parse_point(&parsed.to_point_wkt()), Some(parsed));
    }

    /// Malformed pairs are dropped; well-formed pairs keep their order.
    #[test]
    fn prop_polygon_drops_only_malformed_pairs(
        entries in prop::collection::vec(
            prop_oneof![
                lon_lat_pair().prop_map(Ok::<(f64, f64), String>),
                malformed_pair().prop_map(Err::<(f64, f64), String>),
            ],
            1..24,
        )
    ) {
        let expected: Vec<LatLng> = entries
            .iter()
            .filter_map(|entry| entry.as_ref().ok())
            .map(|&(lon, lat)| LatLng::from_lon_lat(lon, lat))
            .collect();
        let body = entries
            .iter()
            .map(|entry| match entry {
                Ok((lon, lat)) => format!("{lon} {lat}"),
                Err(text) => text.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let parsed = parse_polygon(&format!("POLYGON (({body}))"));
        if expected.is_empty() {
            prop_assert_eq!(parsed, None);
        } else {
            prop_assert_eq!(parsed, Some(vec![expected]));
        }
    }

    /// A multipolygon with k groups parses into k rings, each identical to
    /// what POLYGON parsing yields for that group alone.
    #[test]
    fn prop_multipolygon_ring_per_group(anchors in prop::collection::vec(lon_lat_pair(), 1..8)) {
        let rings = parse_polygon(&multipolygon_wkt(&anchors)).unwrap();
        prop_assert_eq!(rings.len(), anchors.len());
        for (ring, &(lon, lat)) in rings.iter().zip(&anchors) {
            let alone = parse_polygon(&dicemap_test_support::square_polygon_wkt(lon, lat)).unwrap();
            prop_assert_eq!(ring, &alone[0]);
        }
    }

    /// Coordinate-list parsing never panics on arbitrary text.
    #[test]
    fn prop_coordinate_list_total(text in ".{0,64}") {
        let _ = parse_coordinate_list(&text);
        let _ = parse_polygon(&format!("MULTIPOLYGON ((({text})))"));
    }
}
