//! Shared test clocks and fixtures for the dicemap workspace.

mod clock;
mod rows;

pub use clock::{FixedClock, ManualClock, fixed_clock};
pub use rows::{RowBuilder, multipolygon_wkt, point_wkt, square_polygon_wkt};
