//! Far-to-near ordering of drilling phases.

use std::cmp::Ordering;

use splice_types::Phase;

/// Orders two phases by descending distance from the transverse reference.
///
/// Uses [`f64::total_cmp`], so the ordering is total even for NaN inputs.
#[must_use]
pub fn by_descending_distance(a: &Phase, b: &Phase) -> Ordering {
    b.distance().total_cmp(&a.distance())
}

/// Sorts a station's phases far-to-near.
///
/// The sort is stable: phases at equal `|X|` keep their routing order.
pub fn sort_by_distance(phases: &mut [Phase]) {
    phases.sort_by(by_descending_distance);
}
