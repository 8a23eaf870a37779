//! Rails and their reference coordinates.

use std::fmt;

/// 1-based index of a rail, ordered by descending reference Y.
///
/// Rail 1 carries the run's external-axis origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RailIndex(u8);

impl RailIndex {
    /// The six rails of a standard splice assembly.
    pub const STANDARD: [Self; 6] = [Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

    /// Creates a rail index. Returns `None` for `0` or values above `u8::MAX`.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        match u8::try_from(index) {
            Ok(0) | Err(_) => None,
            Ok(i) => Some(Self(i)),
        }
    }

    /// The 1-based index.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Rails 3 and 4 sit between the others and use the narrower flange clearance.
    #[must_use]
    pub const fn is_inner(self) -> bool {
        matches!(self.0, 3 | 4)
    }

    /// Which robot mounting bank serves this rail.
    #[must_use]
    pub const fn bank(self) -> RailBank {
        if self.0 <= 3 {
            RailBank::High
        } else {
            RailBank::Low
        }
    }
}

impl fmt::Display for RailIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half of the rail set reached with the same robot mounting.
///
/// Rails 1 to 3 are on the high-Y bank; rails 4 to 6 are served by the
/// mirrored mounting, which flips joints 1, 4 and 6 of every canned
/// trajectory and swaps interior and exterior flange paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RailBank {
    /// Rails 1, 2 and 3.
    High,
    /// Rails 4, 5 and 6.
    Low,
}

impl RailBank {
    /// Sign applied to joints 1, 4 and 6.
    #[must_use]
    pub const fn joint_sign(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Low => -1.0,
        }
    }
}

/// A rail with its reference Y coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rail {
    /// Index in descending-Y order.
    pub index: RailIndex,
    /// Reference Y coordinate of the rail web.
    pub y: f64,
}

/// The ordered rails of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RailSet {
    rails: Vec<Rail>,
}

impl RailSet {
    /// Builds a rail set from coordinates, sorting them by descending Y.
    ///
    /// Indices are assigned 1.. in sorted order. Coordinates past index 255
    /// are ignored.
    #[must_use]
    pub fn from_coordinates(mut coordinates: Vec<f64>) -> Self {
        coordinates.sort_by(|a, b| b.total_cmp(a));
        let rails = coordinates
            .into_iter()
            .enumerate()
            .filter_map(|(i, y)| RailIndex::new(i + 1).map(|index| Rail { index, y }))
            .collect();
        Self { rails }
    }

    /// Number of rails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rails.len()
    }

    /// Returns `true` if no rail was located.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rails.is_empty()
    }

    /// Reference coordinate of rail 1, the external-axis origin.
    #[must_use]
    pub fn reference(&self) -> Option<f64> {
        self.rails.first().map(|rail| rail.y)
    }

    /// Iterates rails in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Rail> {
        self.rails.iter()
    }

    /// Reference coordinates in index order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<f64> {
        self.rails.iter().map(|rail| rail.y).collect()
    }
}
