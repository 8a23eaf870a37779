//! The fixed step and station skeleton of a splice drilling process.
//!
//! Four steps, each holding a hand-enumerated list of stations:
//!
//! | step | face   | tool | stations |
//! |------|--------|------|----------|
//! | 1    | Web    | 4.8  | 8        |
//! | 2    | Web    | 4.0  | 4        |
//! | 3    | Flange | 4.8  | 12       |
//! | 4    | Flange | 4.2  | 8        |

use splice_types::{Category, Position, Process, RailIndex, Side, Station, Step, Surface};

/// A station slot: where the robot stands and which surface it drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationSlot {
    /// Rail worked on.
    pub rail: RailIndex,
    /// Longitudinal half.
    pub position: Position,
    /// Face and side.
    pub surface: Surface,
}

/// A step skeleton: one face, one tool, ordered station slots.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTemplate {
    /// Face drilled in this step.
    pub category: Category,
    /// Tool diameter (mm).
    pub diameter: f64,
    /// Station slots in execution order.
    pub stations: Vec<StationSlot>,
}

impl StepTemplate {
    /// Creates a step with no stations.
    #[must_use]
    pub const fn new(category: Category, diameter: f64) -> Self {
        Self {
            category,
            diameter,
            stations: Vec::new(),
        }
    }

    /// Appends a web station for `rail` at `position`.
    #[must_use]
    pub fn with_web_station(mut self, rail: RailIndex, position: Position) -> Self {
        self.stations.push(StationSlot {
            rail,
            position,
            surface: Surface::Web,
        });
        self
    }

    /// Appends a flange station for `rail` at `position` on `side`.
    #[must_use]
    pub fn with_flange_station(mut self, rail: RailIndex, position: Position, side: Side) -> Self {
        self.stations.push(StationSlot {
            rail,
            position,
            surface: Surface::Flange(side),
        });
        self
    }
}

/// The ordered step skeleton of a process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTemplate {
    steps: Vec<StepTemplate>,
}

impl ProcessTemplate {
    /// Creates a template from step skeletons in execution order.
    #[must_use]
    pub const fn new(steps: Vec<StepTemplate>) -> Self {
        Self { steps }
    }

    /// The standard six-rail splice process.
    #[must_use]
    pub fn standard() -> Self {
        use Position::{Back, Front};
        use Side::{Left, Right};

        let [r1, r2, r3, r4, r5, r6] = RailIndex::STANDARD;

        let web_large = [r1, r2, r5, r6]
            .into_iter()
            .fold(StepTemplate::new(Category::Web, 4.8), |step, rail| {
                step.with_web_station(rail, Front)
                    .with_web_station(rail, Back)
            });

        let web_small = [r3, r4]
            .into_iter()
            .fold(StepTemplate::new(Category::Web, 4.0), |step, rail| {
                step.with_web_station(rail, Front)
                    .with_web_station(rail, Back)
            });

        // Rail 1 only has a right flange and rail 6 only a left one.
        let flange_large = [
            (r1, Right),
            (r2, Left),
            (r2, Right),
            (r5, Left),
            (r5, Right),
            (r6, Left),
        ]
        .into_iter()
        .fold(StepTemplate::new(Category::Flange, 4.8), |step, (rail, side)| {
            step.with_flange_station(rail, Front, side)
                .with_flange_station(rail, Back, side)
        });

        let flange_small = [(r3, Left), (r3, Right), (r4, Left), (r4, Right)]
            .into_iter()
            .fold(StepTemplate::new(Category::Flange, 4.2), |step, (rail, side)| {
                step.with_flange_station(rail, Front, side)
                    .with_flange_station(rail, Back, side)
            });

        Self::new(vec![web_large, web_small, flange_large, flange_small])
    }

    /// Step skeletons in execution order.
    #[must_use]
    pub fn steps(&self) -> &[StepTemplate] {
        &self.steps
    }

    /// Total number of station slots.
    #[must_use]
    pub fn station_count(&self) -> usize {
        self.steps.iter().map(|step| step.stations.len()).sum()
    }

    /// Creates an empty process with this skeleton.
    ///
    /// Steps and stations are numbered from 1 in template order.
    #[must_use]
    pub fn instantiate(&self) -> Process {
        let steps = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| Step {
                id: i + 1,
                category: step.category,
                diameter: step.diameter,
                stations: step
                    .stations
                    .iter()
                    .enumerate()
                    .map(|(j, slot)| Station::new(j + 1, slot.rail, slot.position, slot.surface))
                    .collect(),
            })
            .collect();
        Process { steps }
    }
}

impl Default for ProcessTemplate {
    fn default() -> Self {
        Self::standard()
    }
}
