//! Conversion of CAD fastener descriptors into a robot drilling process.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. [`locate_rails`] derives the six rail coordinates from the web holes
//! 2. [`classify`] resolves face, rail, position and side of every hole
//! 3. [`RoutingTable`] maps each point into a station of the
//!    [`ProcessTemplate`], counting everything it drops in a [`RoutingReport`]
//! 4. [`resolve_pose`] computes the robot pose and external axis offset
//! 5. [`sort_by_distance`] orders every station far-to-near
//!
//! [`build_process`] runs all of it against a [`ProcessConfig`].
//!
//! # Example
//!
//! ```
//! use splice_process::{build_process, ProcessConfig};
//! use splice_types::{Point3, RawDescriptor, Vector3};
//!
//! let rails = [900.0, 600.0, 300.0, -300.0, -600.0, -900.0];
//! let mut descriptors: Vec<RawDescriptor> = rails
//!     .iter()
//!     .map(|&y| RawDescriptor::new("asna", Point3::new(-400.0, y, 0.0), Vector3::y(), 4.8, 10.0, 0.0))
//!     .collect();
//! descriptors.push(RawDescriptor::new(
//!     "en6115_1",
//!     Point3::new(80.0, 320.0, 4.0),
//!     Vector3::z(),
//!     4.2,
//!     8.0,
//!     3.0,
//! ));
//!
//! let build = build_process(&descriptors, &ProcessConfig::default()).unwrap();
//! assert_eq!(build.process.locate("en6115_1"), Some((4, 1)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod classify;
mod config;
mod context;
mod error;
mod pipeline;
mod pose;
mod rails;
mod routing;
mod sort;
mod template;

pub use classify::{classify, classify_all};
pub use config::{DepthArtifact, FlangeOffsets, ProcessConfig};
pub use context::RunContext;
pub use error::{ProcessError, Result};
pub use pipeline::{ProcessBuild, build_process, build_process_with};
pub use pose::resolve_pose;
pub use rails::{locate_rails, rail_candidates};
pub use routing::{DropReason, RouteOutcome, RoutingReport, RoutingTable, StationRef};
pub use sort::{by_descending_distance, sort_by_distance};
pub use template::{ProcessTemplate, StationSlot, StepTemplate};
