//! Dicemap — WKT-subset geometry parsing.
//!
//! Turns the free-form geometry strings found in region CSV exports into
//! structured coordinates. Only `POINT`, `POLYGON` and `MULTIPOLYGON` with a
//! single ring per polygon are understood. Source text is `lon lat`; every
//! coordinate produced here is a [`LatLng`].
//!
//! Parsing never panics on untrusted input. The `parse_*` functions return
//! `None` (or drop the offending pair) on malformed text; the `try_parse_*`
//! variants report why.

mod coord;
mod error;
mod scan;
mod wkt;

pub use coord::{LatLng, Ring};
pub use error::GeometryError;
pub use wkt::{
    parse_coordinate_list, parse_point, parse_polygon, try_parse_point, try_parse_polygon,
};
