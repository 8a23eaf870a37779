//! Canned joint-space approach paths.

use crate::category::{Position, Surface};
use crate::rail::RailBank;

/// One six-axis joint configuration in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointPose(pub [f64; 6]);

impl JointPose {
    /// Creates a joint pose from its six axis values.
    #[must_use]
    pub const fn new(joints: [f64; 6]) -> Self {
        Self(joints)
    }

    /// Applies the mounting sign to joints 1, 4 and 6.
    #[must_use]
    pub fn mirrored(self, sign: f64) -> Self {
        let [j1, j2, j3, j4, j5, j6] = self.0;
        Self([sign * j1, j2, j3, sign * j4, j5, sign * j6])
    }
}

/// The six calibrated home-to-station paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrajectoryKind {
    /// Web holes, front half.
    WebFront,
    /// Web holes, back half.
    WebBack,
    /// Flange holes on the exterior side, front half.
    FlangeExteriorFront,
    /// Flange holes on the exterior side, back half.
    FlangeExteriorBack,
    /// Flange holes on the interior side, front half.
    FlangeInteriorFront,
    /// Flange holes on the interior side, back half.
    FlangeInteriorBack,
}

impl TrajectoryKind {
    /// Every kind, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::WebFront,
        Self::WebBack,
        Self::FlangeExteriorFront,
        Self::FlangeExteriorBack,
        Self::FlangeInteriorFront,
        Self::FlangeInteriorBack,
    ];

    /// Selects the path for a station.
    ///
    /// On the high bank the left flange side is the exterior one; the
    /// mirrored low-bank mounting swaps interior and exterior.
    #[must_use]
    pub const fn select(surface: Surface, position: Position, bank: RailBank) -> Self {
        match (surface, position) {
            (Surface::Web, Position::Front) => Self::WebFront,
            (Surface::Web, Position::Back) => Self::WebBack,
            (Surface::Flange(side), Position::Front) => {
                if side.is_exterior(bank) {
                    Self::FlangeExteriorFront
                } else {
                    Self::FlangeInteriorFront
                }
            }
            (Surface::Flange(side), Position::Back) => {
                if side.is_exterior(bank) {
                    Self::FlangeExteriorBack
                } else {
                    Self::FlangeInteriorBack
                }
            }
        }
    }

    /// Key used in trajectory data files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::WebFront => "web_front",
            Self::WebBack => "web_back",
            Self::FlangeExteriorFront => "flange_exterior_front",
            Self::FlangeExteriorBack => "flange_exterior_back",
            Self::FlangeInteriorFront => "flange_interior_front",
            Self::FlangeInteriorBack => "flange_interior_back",
        }
    }
}

/// An ordered home-to-station joint path.
///
/// Played forward it is the approach; played backward it is the clearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Which calibrated path this is.
    pub kind: TrajectoryKind,
    /// Joint poses from home to the station.
    pub poses: Vec<JointPose>,
}

impl Trajectory {
    /// Creates a trajectory.
    #[must_use]
    pub const fn new(kind: TrajectoryKind, poses: Vec<JointPose>) -> Self {
        Self { kind, poses }
    }

    /// Number of poses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns `true` if the path has no pose.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::category::Side;

    #[test]
    fn mirroring_flips_joints_one_four_six() {
        let pose = JointPose::new([10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(
            pose.mirrored(-1.0),
            JointPose::new([-10.0, 20.0, 30.0, -40.0, 50.0, -60.0])
        );
        assert_eq!(pose.mirrored(1.0), pose);
    }

    #[test]
    fn web_selection_ignores_bank() {
        for bank in [RailBank::High, RailBank::Low] {
            assert_eq!(
                TrajectoryKind::select(Surface::Web, Position::Front, bank),
                TrajectoryKind::WebFront
            );
            assert_eq!(
                TrajectoryKind::select(Surface::Web, Position::Back, bank),
                TrajectoryKind::WebBack
            );
        }
    }

    #[test]
    fn low_bank_swaps_interior_and_exterior() {
        let left = Surface::Flange(Side::Left);
        let right = Surface::Flange(Side::Right);
        assert_eq!(
            TrajectoryKind::select(left, Position::Front, RailBank::High),
            TrajectoryKind::FlangeExteriorFront
        );
        assert_eq!(
            TrajectoryKind::select(left, Position::Front, RailBank::Low),
            TrajectoryKind::FlangeInteriorFront
        );
        assert_eq!(
            TrajectoryKind::select(right, Position::Back, RailBank::High),
            TrajectoryKind::FlangeInteriorBack
        );
        assert_eq!(
            TrajectoryKind::select(right, Position::Back, RailBank::Low),
            TrajectoryKind::FlangeExteriorBack
        );
    }
}
