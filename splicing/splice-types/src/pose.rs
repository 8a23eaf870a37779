//! Resolved robot poses.

use nalgebra::Point3;

/// Tool orientation as W/P/R angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about X.
    pub w: f64,
    /// Rotation about Y.
    pub p: f64,
    /// Rotation about Z.
    pub r: f64,
}

impl Orientation {
    /// Creates an orientation from W/P/R degrees.
    #[must_use]
    pub const fn new(w: f64, p: f64, r: f64) -> Self {
        Self { w, p, r }
    }
}

/// One drilling operation with a fully resolved robot pose.
///
/// Positions are in the model frame; the fixed world translation is applied
/// when the process is written out.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    /// Fastener instance name.
    pub fastener: String,
    /// Tool frame id (UT).
    pub tool_frame: u8,
    /// User frame id (UF).
    pub user_frame: u8,
    /// Cartesian target (mm).
    pub position: Point3<f64>,
    /// Tool orientation.
    pub orientation: Orientation,
    /// External linear axis offset (mm).
    pub e1: f64,
}

impl Phase {
    /// Longitudinal distance from the transverse reference rail.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.position.x.abs()
    }
}
