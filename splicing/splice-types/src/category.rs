//! Assembly face, longitudinal position and lateral side.
//!
//! These three small enums replace free-form strings: a hole is drilled
//! either in the [`Category::Web`] or the [`Category::Flange`] of a rail, on
//! the [`Position::Front`] or [`Position::Back`] half of the assembly, and
//! flange holes additionally sit on the [`Side::Left`] or [`Side::Right`] of
//! the rail axis. [`Surface`] combines category and side so that a web hole
//! with a side cannot be written down.

use std::fmt;

use crate::rail::RailBank;

/// Assembly face a hole is drilled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Vertical face of the rail profile, drilled along Y.
    Web,
    /// Horizontal face of the rail profile, drilled along Z.
    Flange,
}

impl Category {
    /// Name used in the process document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Flange => "Flange",
        }
    }

    /// Tool frame the robot controller uses for this face.
    #[must_use]
    pub const fn tool_frame(self) -> u8 {
        match self {
            Self::Web => 1,
            Self::Flange => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Longitudinal half of the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    /// Strictly positive X.
    Front,
    /// Zero or negative X.
    Back,
}

impl Position {
    /// Classifies a longitudinal coordinate. `x == 0` is [`Position::Back`].
    #[must_use]
    pub fn from_x(x: f64) -> Self {
        if x > 0.0 { Self::Front } else { Self::Back }
    }

    /// Name used in the process document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lateral side of a flange hole relative to its rail axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Y above the rail reference coordinate.
    Left,
    /// Y at or below the rail reference coordinate.
    Right,
}

impl Side {
    /// Classifies a Y coordinate against the reference coordinate of its rail.
    #[must_use]
    pub fn from_y(y: f64, rail_y: f64) -> Self {
        if y > rail_y { Self::Left } else { Self::Right }
    }

    /// Sign applied to the lateral clearance: `-1` on the left, `+1` on the right.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Whether this side faces away from the assembly center line.
    ///
    /// On the high bank the left side is exterior; the low bank mirrors it.
    #[must_use]
    pub const fn is_exterior(self, bank: RailBank) -> bool {
        matches!(
            (self, bank),
            (Self::Left, RailBank::High) | (Self::Right, RailBank::Low)
        )
    }

    /// Single-letter code used in the process document.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A face together with its side, when the face has one.
///
/// Flange holes always carry a side and web holes never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    /// Web face.
    Web,
    /// Flange face on the given side.
    Flange(Side),
}

impl Surface {
    /// The face without its side.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Web => Category::Web,
            Self::Flange(_) => Category::Flange,
        }
    }

    /// The side, for flange surfaces.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Web => None,
            Self::Flange(side) => Some(side),
        }
    }

    /// Side code for the process document, empty for web surfaces.
    #[must_use]
    pub const fn side_code(self) -> &'static str {
        match self {
            Self::Web => "",
            Self::Flange(side) => side.code(),
        }
    }
}
