//! Run-scoped configuration.
//!
//! Every fixture constant the pipeline depends on lives in a single
//! [`ProcessConfig`] value that is built once and passed by reference into
//! each stage.
//!
//! # Example
//!
//! ```
//! use splice_process::ProcessConfig;
//!
//! let config = ProcessConfig::default()
//!     .with_rail_merge_tolerance(0.2)
//!     .with_flange_clearances(14.0, 11.0);
//!
//! assert!(config.validate().is_ok());
//! ```

use nalgebra::Vector3;
use splice_types::math::in_open_interval;
use splice_types::{Position, RailBank, Side};

use crate::error::{ProcessError, Result};

/// A known CAD rounding artifact on drilled depths.
///
/// Depths strictly inside `(low, high)` are replaced by `corrected`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthArtifact {
    /// Lower bound (exclusive).
    pub low: f64,
    /// Upper bound (exclusive).
    pub high: f64,
    /// Replacement depth.
    pub corrected: f64,
}

impl DepthArtifact {
    /// Applies the correction to a depth.
    #[must_use]
    pub fn correct(&self, depth: f64) -> f64 {
        if in_open_interval(depth, self.low, self.high) {
            self.corrected
        } else {
            depth
        }
    }
}

impl Default for DepthArtifact {
    fn default() -> Self {
        Self {
            low: 5.79,
            high: 5.81,
            corrected: 5.4,
        }
    }
}

/// Longitudinal external-axis offsets for flange holes (mm).
///
/// Keyed by whether the hole side faces outward for its rail bank and by the
/// longitudinal half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlangeOffsets {
    /// Exterior side, front half.
    pub exterior_front: f64,
    /// Exterior side, back half.
    pub exterior_back: f64,
    /// Interior side, front half.
    pub interior_front: f64,
    /// Interior side, back half.
    pub interior_back: f64,
}

impl FlangeOffsets {
    /// Looks up the offset for a flange hole.
    #[must_use]
    pub fn offset(&self, side: Side, position: Position, bank: RailBank) -> f64 {
        match (side.is_exterior(bank), position) {
            (true, Position::Front) => self.exterior_front,
            (true, Position::Back) => self.exterior_back,
            (false, Position::Front) => self.interior_front,
            (false, Position::Back) => self.interior_back,
        }
    }
}

impl Default for FlangeOffsets {
    fn default() -> Self {
        Self {
            exterior_front: 250.0,
            exterior_back: 350.0,
            interior_front: 500.0,
            interior_back: 600.0,
        }
    }
}

/// Configuration for one conversion run.
///
/// Defaults describe the standard six-rail splice fixture:
/// - 6 rails, merged when candidates differ by at most `1e-6`
/// - rails matched within ±50 mm
/// - depths in `(5.79, 5.81)` corrected to 5.4
/// - flange clearance 14 mm on rails 1, 2, 5, 6 and 11 mm on rails 3, 4
/// - web offsets 700 (front) and 800 (back)
/// - flange offsets 250/350 exterior, 500/600 interior
/// - flange holes with `0 < |X| < 45` unreachable
/// - world offset (673.5, -1332, 493.9)
/// - 10° progressive flange rotation
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessConfig {
    expected_rail_count: usize,
    rail_merge_tolerance: f64,
    rail_match_window: f64,
    axis_tolerance: f64,
    depth_artifact: DepthArtifact,
    flange_clearance_outer: f64,
    flange_clearance_inner: f64,
    web_offset_front: f64,
    web_offset_back: f64,
    flange_offsets: FlangeOffsets,
    flange_access_min: f64,
    flange_access_max: f64,
    world_offset: Vector3<f64>,
    flange_rotation_step: f64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessConfig {
    /// Creates the standard fixture configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_rail_count: 6,
            rail_merge_tolerance: 1e-6,
            rail_match_window: 50.0,
            axis_tolerance: 1e-9,
            depth_artifact: DepthArtifact::default(),
            flange_clearance_outer: 14.0,
            flange_clearance_inner: 11.0,
            web_offset_front: 700.0,
            web_offset_back: 800.0,
            flange_offsets: FlangeOffsets::default(),
            flange_access_min: 0.0,
            flange_access_max: 45.0,
            world_offset: Vector3::new(673.5, -1332.0, 493.9),
            flange_rotation_step: 10.0,
        }
    }

    /// Sets the number of rails the assembly must have.
    #[must_use]
    pub const fn with_expected_rail_count(mut self, count: usize) -> Self {
        self.expected_rail_count = count;
        self
    }

    /// Sets how far apart two rail candidates may be and still collapse to one rail.
    #[must_use]
    pub const fn with_rail_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.rail_merge_tolerance = tolerance;
        self
    }

    /// Sets the half-width of the window used to match a hole to a rail.
    #[must_use]
    pub const fn with_rail_match_window(mut self, window: f64) -> Self {
        self.rail_match_window = window;
        self
    }

    /// Sets the tolerance used to decide that a direction component is `±1`.
    #[must_use]
    pub const fn with_axis_tolerance(mut self, tolerance: f64) -> Self {
        self.axis_tolerance = tolerance;
        self
    }

    /// Sets the depth artifact correction.
    #[must_use]
    pub const fn with_depth_artifact(mut self, artifact: DepthArtifact) -> Self {
        self.depth_artifact = artifact;
        self
    }

    /// Sets the flange lateral clearances for outer rails (1, 2, 5, 6) and
    /// inner rails (3, 4).
    #[must_use]
    pub const fn with_flange_clearances(mut self, outer: f64, inner: f64) -> Self {
        self.flange_clearance_outer = outer;
        self.flange_clearance_inner = inner;
        self
    }

    /// Sets the web longitudinal offsets.
    #[must_use]
    pub const fn with_web_offsets(mut self, front: f64, back: f64) -> Self {
        self.web_offset_front = front;
        self.web_offset_back = back;
        self
    }

    /// Sets the flange longitudinal offsets.
    #[must_use]
    pub const fn with_flange_offsets(mut self, offsets: FlangeOffsets) -> Self {
        self.flange_offsets = offsets;
        self
    }

    /// Sets the open `|X|` interval in which flange holes cannot be reached.
    #[must_use]
    pub const fn with_flange_access_window(mut self, min: f64, max: f64) -> Self {
        self.flange_access_min = min;
        self.flange_access_max = max;
        self
    }

    /// Sets the translation from the model frame to the robot world frame.
    #[must_use]
    pub fn with_world_offset(mut self, offset: Vector3<f64>) -> Self {
        self.world_offset = offset;
        self
    }

    /// Sets the per-hole tool rotation increment for flange stations (degrees).
    #[must_use]
    pub const fn with_flange_rotation_step(mut self, step: f64) -> Self {
        self.flange_rotation_step = step;
        self
    }

    /// Number of rails the assembly must have.
    #[must_use]
    pub const fn expected_rail_count(&self) -> usize {
        self.expected_rail_count
    }

    /// Rail candidate merge tolerance.
    #[must_use]
    pub const fn rail_merge_tolerance(&self) -> f64 {
        self.rail_merge_tolerance
    }

    /// Rail match half-window.
    #[must_use]
    pub const fn rail_match_window(&self) -> f64 {
        self.rail_match_window
    }

    /// Axis alignment tolerance.
    #[must_use]
    pub const fn axis_tolerance(&self) -> f64 {
        self.axis_tolerance
    }

    /// Applies the depth artifact correction.
    #[must_use]
    pub fn corrected_depth(&self, depth: f64) -> f64 {
        self.depth_artifact.correct(depth)
    }

    /// Lateral flange clearance for a rail.
    #[must_use]
    pub const fn flange_clearance(&self, inner_rail: bool) -> f64 {
        if inner_rail {
            self.flange_clearance_inner
        } else {
            self.flange_clearance_outer
        }
    }

    /// Web longitudinal offset for a half.
    #[must_use]
    pub const fn web_offset(&self, position: Position) -> f64 {
        match position {
            Position::Front => self.web_offset_front,
            Position::Back => self.web_offset_back,
        }
    }

    /// Flange longitudinal offset table.
    #[must_use]
    pub const fn flange_offsets(&self) -> &FlangeOffsets {
        &self.flange_offsets
    }

    /// Returns `true` if a flange hole at longitudinal coordinate `x` can be reached.
    #[must_use]
    pub fn flange_reachable(&self, x: f64) -> bool {
        !in_open_interval(x.abs(), self.flange_access_min, self.flange_access_max)
    }

    /// Translation from the model frame to the robot world frame.
    #[must_use]
    pub const fn world_offset(&self) -> &Vector3<f64> {
        &self.world_offset
    }

    /// Per-hole flange tool rotation increment (degrees).
    #[must_use]
    pub const fn flange_rotation_step(&self) -> f64 {
        self.flange_rotation_step
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::InvalidConfig`] naming the first field that is
    /// non-finite or out of range.
    pub fn validate(&self) -> Result<()> {
        if self.expected_rail_count == 0 {
            return Err(ProcessError::invalid_config(
                "expected_rail_count",
                "at least one rail is required",
            ));
        }
        non_negative("rail_merge_tolerance", self.rail_merge_tolerance)?;
        positive("rail_match_window", self.rail_match_window)?;
        non_negative("axis_tolerance", self.axis_tolerance)?;
        finite("depth_artifact.low", self.depth_artifact.low)?;
        finite("depth_artifact.high", self.depth_artifact.high)?;
        finite("depth_artifact.corrected", self.depth_artifact.corrected)?;
        finite("flange_clearance_outer", self.flange_clearance_outer)?;
        finite("flange_clearance_inner", self.flange_clearance_inner)?;
        finite("web_offset_front", self.web_offset_front)?;
        finite("web_offset_back", self.web_offset_back)?;
        finite("flange_offsets.exterior_front", self.flange_offsets.exterior_front)?;
        finite("flange_offsets.exterior_back", self.flange_offsets.exterior_back)?;
        finite("flange_offsets.interior_front", self.flange_offsets.interior_front)?;
        finite("flange_offsets.interior_back", self.flange_offsets.interior_back)?;
        non_negative("flange_access_min", self.flange_access_min)?;
        finite("flange_access_max", self.flange_access_max)?;
        if self.flange_access_max < self.flange_access_min {
            return Err(ProcessError::invalid_config(
                "flange_access_max",
                "must not be below flange_access_min",
            ));
        }
        if !self.world_offset.iter().all(|v| v.is_finite()) {
            return Err(ProcessError::invalid_config(
                "world_offset",
                "all components must be finite",
            ));
        }
        finite("flange_rotation_step", self.flange_rotation_step)
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProcessError::invalid_config(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ProcessError::invalid_config(field, format!("{value} is negative")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ProcessError::invalid_config(field, format!("{value} is not positive")));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ProcessConfig::default().validate().is_ok());
    }

    #[test]
    fn depth_artifact_is_corrected() {
        let config = ProcessConfig::default();
        assert_eq!(config.corrected_depth(5.80), 5.4);
        assert_eq!(config.corrected_depth(5.805), 5.4);
        assert_eq!(config.corrected_depth(5.81), 5.81);
        assert_eq!(config.corrected_depth(6.35), 6.35);
    }

    #[test]
    fn flange_offset_table() {
        let offsets = FlangeOffsets::default();
        let cases = [
            (Side::Left, Position::Front, RailBank::High, 250.0),
            (Side::Left, Position::Back, RailBank::High, 350.0),
            (Side::Left, Position::Front, RailBank::Low, 500.0),
            (Side::Left, Position::Back, RailBank::Low, 600.0),
            (Side::Right, Position::Front, RailBank::High, 500.0),
            (Side::Right, Position::Back, RailBank::High, 600.0),
            (Side::Right, Position::Front, RailBank::Low, 250.0),
            (Side::Right, Position::Back, RailBank::Low, 350.0),
        ];
        for (side, position, bank, expected) in cases {
            assert_eq!(offsets.offset(side, position, bank), expected);
        }
    }

    #[test]
    fn flange_reachability_window() {
        let config = ProcessConfig::default();
        assert!(!config.flange_reachable(20.0));
        assert!(!config.flange_reachable(-20.0));
        assert!(config.flange_reachable(50.0));
        assert!(config.flange_reachable(-50.0));
        assert!(config.flange_reachable(45.0));
        assert!(config.flange_reachable(0.0));
    }

    #[test]
    fn clearances_by_rail_group() {
        let config = ProcessConfig::default().with_flange_clearances(15.0, 12.0);
        assert_eq!(config.flange_clearance(false), 15.0);
        assert_eq!(config.flange_clearance(true), 12.0);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ProcessConfig::default()
            .with_rail_match_window(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::InvalidConfig {
                field: "rail_match_window",
                ..
            }
        ));

        let err = ProcessConfig::default()
            .with_rail_merge_tolerance(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("rail_merge_tolerance"));

        assert!(ProcessConfig::default()
            .with_expected_rail_count(0)
            .validate()
            .is_err());
        assert!(ProcessConfig::default()
            .with_flange_access_window(45.0, 10.0)
            .validate()
            .is_err());
    }
}
