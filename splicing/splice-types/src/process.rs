//! The process tree: steps, stations and their phases.

use crate::category::{Category, Position, Surface};
use crate::pose::Phase;
use crate::rail::RailIndex;

/// A complete drilling process, steps in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Process {
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

impl Process {
    /// Total number of drilling phases across all stations.
    #[must_use]
    pub fn phase_count(&self) -> usize {
        self.stations().map(|station| station.phases.len()).sum()
    }

    /// Iterates every station of every step, in execution order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.steps.iter().flat_map(|step| step.stations.iter())
    }

    /// Finds the station holding the named fastener.
    ///
    /// Returns the 1-based step and station ids.
    #[must_use]
    pub fn locate(&self, fastener: &str) -> Option<(usize, usize)> {
        self.steps.iter().find_map(|step| {
            step.stations
                .iter()
                .find(|station| station.phases.iter().any(|p| p.fastener == fastener))
                .map(|station| (step.id, station.id))
        })
    }
}

/// All holes of one face drilled with one tool diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// 1-based step number.
    pub id: usize,
    /// Face drilled in this step.
    pub category: Category,
    /// Tool diameter (mm).
    pub diameter: f64,
    /// Stations in execution order.
    pub stations: Vec<Station>,
}

/// All holes of one step sharing rail, position and surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// 1-based station number within its step.
    pub id: usize,
    /// Rail worked on.
    pub rail: RailIndex,
    /// Longitudinal half.
    pub position: Position,
    /// Face and side.
    pub surface: Surface,
    /// Drilling phases in execution order.
    pub phases: Vec<Phase>,
}

impl Station {
    /// Creates an empty station.
    #[must_use]
    pub const fn new(id: usize, rail: RailIndex, position: Position, surface: Surface) -> Self {
        Self {
            id,
            rail,
            position,
            surface,
            phases: Vec::new(),
        }
    }

    /// Number of drilling phases.
    #[must_use]
    pub fn points(&self) -> usize {
        self.phases.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::category::Side;
    use crate::pose::Orientation;
    use nalgebra::Point3;

    fn phase(name: &str) -> Phase {
        Phase {
            fastener: name.into(),
            tool_frame: 2,
            user_frame: 1,
            position: Point3::new(60.0, 0.0, 0.0),
            orientation: Orientation::new(-180.0, 0.0, 90.0),
            e1: 0.0,
        }
    }

    #[test]
    fn locate_reports_step_and_station_ids() {
        let mut station = Station::new(
            3,
            RailIndex::new(2).unwrap(),
            Position::Front,
            Surface::Flange(Side::Left),
        );
        station.phases.push(phase("en6115_7"));
        let process = Process {
            steps: vec![Step {
                id: 3,
                category: Category::Flange,
                diameter: 4.8,
                stations: vec![station],
            }],
        };

        assert_eq!(process.phase_count(), 1);
        assert_eq!(process.locate("en6115_7"), Some((3, 3)));
        assert_eq!(process.locate("missing"), None);
    }
}
