//! Declarative routing of classified points into template stations.
//!
//! A [`RoutingTable`] maps a routing key (face, tool diameter, rail,
//! position, side) to the station slot that drills it. Points that cannot
//! be keyed, that fail the flange reachability gate, or whose key is not in
//! the table are dropped with an explicit [`DropReason`], and a
//! [`RoutingReport`] counts every outcome.

use std::fmt;

use hashbrown::HashMap;
use splice_types::{Category, Position, RailIndex, SemanticPoint, Side};

use crate::config::ProcessConfig;
use crate::template::ProcessTemplate;

/// Diameter resolution of the routing key (mm).
const DIAMETER_RESOLUTION: f64 = 1e-3;

/// Zero-based location of a station inside a process template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationRef {
    /// Step index.
    pub step: usize,
    /// Station index within the step.
    pub station: usize,
}

/// Why a point was left out of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropReason {
    /// Drilling direction aligned with neither Y nor Z.
    Unclassified,
    /// No rail within the match window.
    UnassignedRail,
    /// Flange hole inside the tool clearance window.
    Inaccessible,
    /// No station is set up for this face, tool, rail, position and side.
    NoMatchingStation,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unclassified => "unclassified direction",
            Self::UnassignedRail => "no rail in match window",
            Self::Inaccessible => "flange hole out of tool reach",
            Self::NoMatchingStation => "no matching station",
        })
    }
}

/// Result of routing one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The point belongs to this station.
    Station(StationRef),
    /// The point is left out of the process.
    Dropped(DropReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RouteKey {
    category: Category,
    diameter: i64,
    rail: RailIndex,
    position: Position,
    side: Option<Side>,
}

// Tool diameters are a few millimetres; the rounded value always fits.
#[allow(clippy::cast_possible_truncation)]
fn diameter_key(diameter: f64) -> i64 {
    (diameter / DIAMETER_RESOLUTION).round() as i64
}

/// Lookup table from routing key to station.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    entries: HashMap<RouteKey, StationRef>,
}

impl RoutingTable {
    /// Builds the table from a template.
    ///
    /// If two slots share a key, the first one in template order wins.
    #[must_use]
    pub fn from_template(template: &ProcessTemplate) -> Self {
        let mut entries = HashMap::new();
        for (step_index, step) in template.steps().iter().enumerate() {
            for (station_index, slot) in step.stations.iter().enumerate() {
                let key = RouteKey {
                    category: slot.surface.category(),
                    diameter: diameter_key(step.diameter),
                    rail: slot.rail,
                    position: slot.position,
                    side: slot.surface.side(),
                };
                entries.entry(key).or_insert(StationRef {
                    step: step_index,
                    station: station_index,
                });
            }
        }
        Self { entries }
    }

    /// Number of routable keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is routable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routes one point.
    ///
    /// Flange holes with `|X|` inside the configured clearance window are
    /// dropped before lookup; web holes are never gated.
    #[must_use]
    pub fn route(&self, point: &SemanticPoint, config: &ProcessConfig) -> RouteOutcome {
        let Some(category) = point.category else {
            return RouteOutcome::Dropped(DropReason::Unclassified);
        };
        let Some(rail) = point.rail else {
            return RouteOutcome::Dropped(DropReason::UnassignedRail);
        };
        if category == Category::Flange && !config.flange_reachable(point.location.x) {
            return RouteOutcome::Dropped(DropReason::Inaccessible);
        }

        let key = RouteKey {
            category,
            diameter: diameter_key(point.diameter),
            rail,
            position: point.position,
            side: point.side,
        };
        self.entries
            .get(&key)
            .map_or(RouteOutcome::Dropped(DropReason::NoMatchingStation), |&target| {
                RouteOutcome::Station(target)
            })
    }
}

/// Counts of routing outcomes for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingReport {
    /// Points placed in a station.
    pub routed: usize,
    /// Points with an unclassified direction.
    pub unclassified: usize,
    /// Points with no rail in the match window.
    pub unassigned_rail: usize,
    /// Flange points out of tool reach.
    pub inaccessible: usize,
    /// Points with no matching station.
    pub no_matching_station: usize,
}

impl RoutingReport {
    /// Records one outcome.
    pub fn record(&mut self, outcome: RouteOutcome) {
        match outcome {
            RouteOutcome::Station(_) => self.routed += 1,
            RouteOutcome::Dropped(reason) => *self.slot(reason) += 1,
        }
    }

    /// Number of points dropped for `reason`.
    #[must_use]
    pub const fn count(&self, reason: DropReason) -> usize {
        match reason {
            DropReason::Unclassified => self.unclassified,
            DropReason::UnassignedRail => self.unassigned_rail,
            DropReason::Inaccessible => self.inaccessible,
            DropReason::NoMatchingStation => self.no_matching_station,
        }
    }

    /// Number of points dropped for any reason.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.unclassified + self.unassigned_rail + self.inaccessible + self.no_matching_station
    }

    /// Number of points seen.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.routed + self.dropped()
    }

    fn slot(&mut self, reason: DropReason) -> &mut usize {
        match reason {
            DropReason::Unclassified => &mut self.unclassified,
            DropReason::UnassignedRail => &mut self.unassigned_rail,
            DropReason::Inaccessible => &mut self.inaccessible,
            DropReason::NoMatchingStation => &mut self.no_matching_station,
        }
    }
}

impl fmt::Display for RoutingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} routed, {} dropped (unclassified {}, no rail {}, out of reach {}, no station {})",
            self.routed,
            self.dropped(),
            self.unclassified,
            self.unassigned_rail,
            self.inaccessible,
            self.no_matching_station
        )
    }
}
