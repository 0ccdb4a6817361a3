//! Round filter engine.
//!
//! Survivors are always recomputed from the full catalog and the full
//! outcome sequence; nothing is patched incrementally.

use dicemap_catalog::{Region, RegionCatalog};
use dicemap_geometry::LatLng;

use super::die::DieFace;

/// The result of narrowing a catalog by a sequence of outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Narrowing {
    /// Catalog indices of the surviving regions, in catalog order.
    pub survivors: Vec<usize>,
    /// Map focus after this narrowing.
    pub focus: Option<LatLng>,
}

/// Catalog indices of the regions that match every outcome so far.
///
/// Outcome `i` (0-based) is compared against round key `i + 1`. A region
/// with no key for a round never survives that round.
#[must_use]
pub fn survivor_indices(catalog: &RegionCatalog, outcomes: &[DieFace]) -> Vec<usize> {
    let regions = catalog.regions();
    let mut survivors: Vec<usize> = (0..regions.len()).collect();
    for (index, face) in outcomes.iter().enumerate() {
        let round = index + 1;
        survivors.retain(|&candidate| regions[candidate].matches_round(round, face.get()));
    }
    survivors
}

/// The surviving regions themselves.
#[must_use]
pub fn filter<'c>(catalog: &'c RegionCatalog, outcomes: &[DieFace]) -> Vec<&'c Region> {
    survivor_indices(catalog, outcomes)
        .into_iter()
        .filter_map(|index| catalog.get(index))
        .collect()
}

/// The new focus: the first survivor's center, or `previous` when there is
/// no survivor or it has no center.
#[must_use]
pub fn refocus(
    catalog: &RegionCatalog,
    survivors: &[usize],
    previous: Option<LatLng>,
) -> Option<LatLng> {
    survivors
        .first()
        .and_then(|&index| catalog.get(index))
        .and_then(Region::center)
        .or(previous)
}

/// Filters and refocuses in one step.
#[must_use]
pub fn narrow(
    catalog: &RegionCatalog,
    outcomes: &[DieFace],
    previous_focus: Option<LatLng>,
) -> Narrowing {
    let survivors = survivor_indices(catalog, outcomes);
    let focus = refocus(catalog, &survivors, previous_focus);
    Narrowing { survivors, focus }
}
