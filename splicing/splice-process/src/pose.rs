//! Robot pose resolution for classified points.
//!
//! The external axis is a linear rail the robot rides on, parallel to Y.
//! Moving it by `E1` shifts the robot base, so the in-plane target Y is the
//! hole Y reflected through the axis position: `Y' = 2·E1 + Y_hole`.

use nalgebra::Point3;
use splice_types::math::sign;
use splice_types::{Orientation, Phase, SemanticPoint, Side, Surface};

use crate::context::RunContext;

/// User frame of every drilling target.
const WORLD_FRAME: u8 = 1;

/// Resolves the drilling pose of a point.
///
/// Returns `None` for points without a surface or rail; the router never
/// places such points in a station.
///
/// - Web: `W = sign(Y)·90`, `P = -90`, `R = 0`; the hole is taken at
///   mid-depth along the web normal and offset by the front/back web offset.
/// - Flange: `W = -180`, `P = 0`, `R = ∓90` by side; the hole is shifted by
///   the lateral clearance of its rail and offset by the flange table.
#[must_use]
pub fn resolve_pose(point: &SemanticPoint, ctx: &RunContext<'_>) -> Option<Phase> {
    let surface = point.surface()?;
    let rail = point.rail?;
    let config = ctx.config();
    let y = point.location.y;

    let (orientation, e1, target_y) = match surface {
        Surface::Web => {
            let hole_y = point.web_mid_depth_y();
            let offset = config.web_offset(point.position);
            let e1 = (ctx.reference_y() - hole_y) + sign(y) * offset;
            (Orientation::new(sign(y) * 90.0, -90.0, 0.0), e1, 2.0 * e1 + hole_y)
        }
        Surface::Flange(side) => {
            let clearance = config.flange_clearance(rail.is_inner());
            let offset = config
                .flange_offsets()
                .offset(side, point.position, rail.bank());
            let e1 = ctx.reference_y() - side.sign().mul_add(clearance, y) + sign(y) * offset;
            let r = match side {
                Side::Left => 90.0,
                Side::Right => -90.0,
            };
            (Orientation::new(-180.0, 0.0, r), e1, 2.0 * e1 + y)
        }
    };

    Some(Phase {
        fastener: point.name.clone(),
        tool_frame: surface.category().tool_frame(),
        user_frame: WORLD_FRAME,
        position: Point3::new(point.location.x, target_y, point.location.z),
        orientation,
        e1,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::ProcessConfig;
    use approx::assert_relative_eq;
    use splice_types::{Category, Position, RailIndex, RailSet, Vector3};

    const RAILS: [f64; 6] = [900.0, 600.0, 300.0, -300.0, -600.0, -900.0];

    fn web_point(x: f64, y: f64, ydir: f64, rail: usize) -> SemanticPoint {
        SemanticPoint {
            name: "asna_1".into(),
            category: Some(Category::Web),
            diameter: 4.8,
            rail: RailIndex::new(rail),
            position: Position::from_x(x),
            side: None,
            depth: 5.4,
            location: Point3::new(x, y, 12.0),
            direction: Vector3::new(0.0, ydir, 0.0),
        }
    }

    fn flange_point(x: f64, y: f64, rail: usize, side: Side) -> SemanticPoint {
        SemanticPoint {
            name: "en6115_1".into(),
            category: Some(Category::Flange),
            diameter: 4.2,
            rail: RailIndex::new(rail),
            position: Position::from_x(x),
            side: Some(side),
            depth: 3.0,
            location: Point3::new(x, y, -4.0),
            direction: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn web_front_pose() {
        let config = ProcessConfig::default();
        let ctx = RunContext::new(&config, RailSet::from_coordinates(RAILS.to_vec())).unwrap();
        let phase = resolve_pose(&web_point(150.0, 897.3, 1.0, 1), &ctx).unwrap();

        // Hole mid-depth at 897.3 + 2.7 = 900, on the reference rail.
        assert_relative_eq!(phase.e1, 700.0, epsilon = 1e-9);
        assert_relative_eq!(phase.position.y, 2300.0, epsilon = 1e-9);
        assert_eq!(phase.position.x, 150.0);
        assert_eq!(phase.position.z, 12.0);
        assert_eq!(phase.orientation, Orientation::new(90.0, -90.0, 0.0));
        assert_eq!(phase.tool_frame, 1);
        assert_eq!(phase.user_frame, 1);
        assert_eq!(phase.fastener, "asna_1");
    }

    #[test]
    fn web_back_pose_on_negative_side() {
        let config = ProcessConfig::default();
        let ctx = RunContext::new(&config, RailSet::from_coordinates(RAILS.to_vec())).unwrap();
        let phase = resolve_pose(&web_point(-40.0, -597.3, -1.0, 5), &ctx).unwrap();

        // hole_y = -597.3 - 2.7 = -600; e1 = (900 + 600) - 800 = 700.
        assert_relative_eq!(phase.e1, 700.0, epsilon = 1e-9);
        assert_relative_eq!(phase.position.y, 800.0, epsilon = 1e-9);
        assert_eq!(phase.orientation.w, -90.0);
    }

    #[test]
    fn flange_inner_rail_left_back() {
        let config = ProcessConfig::default();
        let ctx = RunContext::new(&config, RailSet::from_coordinates(RAILS.to_vec())).unwrap();
        let phase = resolve_pose(&flange_point(-50.0, 320.0, 3, Side::Left), &ctx).unwrap();

        // e1 = 900 - (320 - 11) + 350 = 941
        assert_relative_eq!(phase.e1, 941.0, epsilon = 1e-9);
        assert_relative_eq!(phase.position.y, 2202.0, epsilon = 1e-9);
        assert_eq!(phase.orientation, Orientation::new(-180.0, 0.0, 90.0));
        assert_eq!(phase.tool_frame, 2);
        assert_eq!(phase.position.z, -4.0);
    }

    #[test]
    fn flange_outer_rail_right_front_low_bank() {
        let config = ProcessConfig::default();
        let ctx = RunContext::new(&config, RailSet::from_coordinates(RAILS.to_vec())).unwrap();
        let phase = resolve_pose(&flange_point(80.0, -610.0, 5, Side::Right), &ctx).unwrap();

        // e1 = 900 - (-610 + 14) - 250 = 1246
        assert_relative_eq!(phase.e1, 1246.0, epsilon = 1e-9);
        assert_relative_eq!(phase.position.y, 1882.0, epsilon = 1e-9);
        assert_eq!(phase.orientation.r, -90.0);
    }

    #[test]
    fn clearances_come_from_config() {
        let config = ProcessConfig::default().with_flange_clearances(20.0, 11.0);
        let ctx = RunContext::new(&config, RailSet::from_coordinates(RAILS.to_vec())).unwrap();
        let phase = resolve_pose(&flange_point(80.0, 610.0, 2, Side::Left), &ctx).unwrap();

        // e1 = 900 - (610 - 20) + 250 = 560
        assert_relative_eq!(phase.e1, 560.0, epsilon = 1e-9);
    }

    #[test]
    fn unroutable_points_have_no_pose() {
        let config = ProcessConfig::default();
        let ctx = RunContext::new(&config, RailSet::from_coordinates(RAILS.to_vec())).unwrap();
        let mut point = web_point(10.0, 0.0, 1.0, 1);
        point.rail = None;
        assert!(resolve_pose(&point, &ctx).is_none());

        let mut point = flange_point(80.0, 610.0, 2, Side::Left);
        point.side = None;
        assert!(resolve_pose(&point, &ctx).is_none());
    }
}
