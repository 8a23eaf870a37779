//! Descriptors enriched with semantic attributes.

use nalgebra::{Point3, Vector3};

use crate::category::{Category, Position, Side, Surface};
use crate::math::sign;
use crate::rail::RailIndex;

/// A fastener hole with its face, rail, position and side resolved.
///
/// `category` is `None` when the drilling direction is aligned with neither
/// Y nor Z, and `rail` is `None` when no rail lies within the match window.
/// Such points never reach a station.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticPoint {
    /// Fastener instance name.
    pub name: String,
    /// Assembly face.
    pub category: Option<Category>,
    /// Hole diameter (mm).
    pub diameter: f64,
    /// Matched rail.
    pub rail: Option<RailIndex>,
    /// Longitudinal half.
    pub position: Position,
    /// Lateral side, for flange holes on a matched rail.
    pub side: Option<Side>,
    /// Depth after artifact correction (mm).
    pub depth: f64,
    /// Raw hole position (mm).
    pub location: Point3<f64>,
    /// Raw drilling direction.
    pub direction: Vector3<f64>,
}

impl SemanticPoint {
    /// Face and side combined, when both are consistent.
    ///
    /// Returns `None` for unclassified points and for flange points whose
    /// side could not be determined.
    #[must_use]
    pub fn surface(&self) -> Option<Surface> {
        match (self.category?, self.side) {
            (Category::Web, _) => Some(Surface::Web),
            (Category::Flange, Some(side)) => Some(Surface::Flange(side)),
            (Category::Flange, None) => None,
        }
    }

    /// Sign of the Y drilling direction.
    #[must_use]
    pub fn y_dir_sign(&self) -> f64 {
        sign(self.direction.y)
    }

    /// Y coordinate halfway down the hole along the web normal: `Y + sign(Ydir) · depth / 2`.
    #[must_use]
    pub fn web_mid_depth_y(&self) -> f64 {
        self.location.y + self.y_dir_sign() * self.depth / 2.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(category: Option<Category>, side: Option<Side>) -> SemanticPoint {
        SemanticPoint {
            name: "asna_1".into(),
            category,
            diameter: 4.8,
            rail: RailIndex::new(1),
            position: Position::Front,
            side,
            depth: 5.4,
            location: Point3::new(100.0, 500.0, 20.0),
            direction: Vector3::new(0.0, -1.0, 0.0),
        }
    }

    #[test]
    fn surface_requires_side_for_flange() {
        assert_eq!(point(Some(Category::Web), None).surface(), Some(Surface::Web));
        assert_eq!(
            point(Some(Category::Flange), Some(Side::Left)).surface(),
            Some(Surface::Flange(Side::Left))
        );
        assert_eq!(point(Some(Category::Flange), None).surface(), None);
        assert_eq!(point(None, None).surface(), None);
    }

    #[test]
    fn mid_depth_follows_direction() {
        let p = point(Some(Category::Web), None);
        assert_eq!(p.y_dir_sign(), -1.0);
        assert_relative_eq!(p.web_mid_depth_y(), 497.3);
    }
}
