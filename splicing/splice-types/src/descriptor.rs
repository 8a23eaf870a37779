//! Raw fastener descriptors as exported from CAD.

use nalgebra::{Point3, Vector3};

/// One fastener hole as read from the CAD model. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDescriptor {
    /// Fastener instance name.
    pub name: String,
    /// Hole position in the model frame (mm).
    pub position: Point3<f64>,
    /// Unit drilling direction.
    pub direction: Vector3<f64>,
    /// Hole diameter (mm).
    pub diameter: f64,
    /// Fastener length (mm).
    pub length: f64,
    /// Drilled depth (mm), uncorrected.
    pub depth: f64,
}

impl RawDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: Point3<f64>,
        direction: Vector3<f64>,
        diameter: f64,
        length: f64,
        depth: f64,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            direction,
            diameter,
            length,
            depth,
        }
    }
}
