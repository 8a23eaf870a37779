//! Core types for rail splicing drilling processes.
//!
//! This crate holds the closed vocabulary shared by every stage of the
//! conversion from CAD fastener descriptors to a robot drilling process:
//!
//! - **Descriptors**: raw hole geometry as exported from CAD ([`RawDescriptor`])
//! - **Classification**: assembly face, longitudinal position and lateral
//!   side ([`Category`], [`Position`], [`Side`], [`Surface`])
//! - **Rails**: the six structural members and their reference coordinates
//!   ([`RailIndex`], [`Rail`], [`RailSet`])
//! - **Points**: descriptors enriched with semantic attributes ([`SemanticPoint`])
//! - **Process tree**: [`Process`] → [`Step`] → [`Station`] → [`Phase`]
//! - **Trajectories**: canned joint-space paths ([`Trajectory`], [`JointPose`])
//!
//! # Layer 0 Crate
//!
//! No I/O and no algorithms live here; the pipeline is in `splice-process`
//! and the external formats are in `splice-io`.
//!
//! # Example
//!
//! ```
//! use splice_types::{Category, Position, RailIndex, Side, Surface};
//!
//! let rail = RailIndex::new(3).unwrap();
//! let surface = Surface::Flange(Side::Left);
//!
//! assert_eq!(surface.category(), Category::Flange);
//! assert_eq!(Position::from_x(-12.0), Position::Back);
//! assert!(rail.is_inner());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod category;
mod descriptor;
pub mod math;
mod point;
mod pose;
mod process;
mod rail;
mod trajectory;

pub use category::{Category, Position, Side, Surface};
pub use descriptor::RawDescriptor;
pub use point::SemanticPoint;
pub use pose::{Orientation, Phase};
pub use process::{Process, Station, Step};
pub use rail::{Rail, RailBank, RailIndex, RailSet};
pub use trajectory::{JointPose, Trajectory, TrajectoryKind};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
