//! Rail location from web hole markers.
//!
//! Every web hole sits in the web of one rail, so its mid-depth Y coordinate
//! is a sample of that rail's reference coordinate. Collapsing the samples
//! and sorting them by descending Y yields the rail set.

use splice_types::math::{is_unit_component, sign};
use splice_types::{RailSet, RawDescriptor};
use tracing::{debug, info};

use crate::config::ProcessConfig;
use crate::error::{ProcessError, Result};

/// Collects distinct rail reference coordinates in first-seen order.
///
/// A descriptor contributes `Y + sign(Ydir) · depth / 2` when its direction is
/// aligned with Y, depth corrected for the known CAD artifact. Candidates
/// within the configured merge tolerance of an earlier one are dropped.
#[must_use]
pub fn rail_candidates(descriptors: &[RawDescriptor], config: &ProcessConfig) -> Vec<f64> {
    let tolerance = config.rail_merge_tolerance();
    let mut candidates: Vec<f64> = Vec::new();

    for descriptor in descriptors {
        if !is_unit_component(descriptor.direction.y, config.axis_tolerance()) {
            continue;
        }
        let depth = config.corrected_depth(descriptor.depth);
        let candidate = descriptor.position.y + sign(descriptor.direction.y) * depth / 2.0;
        if candidates.iter().any(|&c| (c - candidate).abs() <= tolerance) {
            continue;
        }
        candidates.push(candidate);
    }

    candidates
}

/// Locates the rails of the assembly.
///
/// # Errors
///
/// Returns [`ProcessError::RailCount`] if the number of distinct rails does
/// not match the configured count.
///
/// # Example
///
/// ```
/// use splice_process::{ProcessConfig, locate_rails};
/// use splice_types::{Point3, RawDescriptor, Vector3};
///
/// let markers: Vec<_> = [900.0, 600.0, 300.0, -300.0, -600.0, -900.0]
///     .iter()
///     .map(|&y| RawDescriptor::new("asna", Point3::new(100.0, y, 0.0), Vector3::y(), 4.8, 10.0, 0.0))
///     .collect();
///
/// let rails = locate_rails(&markers, &ProcessConfig::default()).unwrap();
/// assert_eq!(rails.len(), 6);
/// assert_eq!(rails.reference(), Some(900.0));
/// ```
pub fn locate_rails(descriptors: &[RawDescriptor], config: &ProcessConfig) -> Result<RailSet> {
    let candidates = rail_candidates(descriptors, config);
    debug!(candidates = candidates.len(), "Collected rail candidates");

    let rails = RailSet::from_coordinates(candidates);
    if rails.len() != config.expected_rail_count() {
        return Err(ProcessError::RailCount {
            expected: config.expected_rail_count(),
            found: rails.len(),
        });
    }

    info!(rails = rails.len(), reference = rails.reference(), "Located rails");
    Ok(rails)
}
