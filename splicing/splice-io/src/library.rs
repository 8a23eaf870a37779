//! The calibrated approach paths, loaded from versioned JSON data.
//!
//! The default data set ships with the crate; a replacement file can be
//! loaded at run time without rebuilding:
//!
//! ```json
//! {
//!   "version": 1,
//!   "trajectories": {
//!     "web_front": [[0, 25, -40, 0, 113, 0], ...],
//!     ...
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use splice_types::{JointPose, Trajectory, TrajectoryKind};
use tracing::debug;

use crate::error::{IoResult, SpliceIoError};

/// Data format version understood by this crate.
pub const TRAJECTORY_FORMAT_VERSION: u32 = 1;

const STANDARD_TRAJECTORIES: &str = include_str!("../assets/trajectories.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrajectoryFile {
    version: u32,
    trajectories: BTreeMap<String, Vec<[f64; 6]>>,
}

/// All six approach paths, one per [`TrajectoryKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryLibrary {
    // Indexed in `TrajectoryKind::ALL` order.
    trajectories: Vec<Trajectory>,
}

impl TrajectoryLibrary {
    /// The calibration data shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled data is corrupt.
    pub fn standard() -> IoResult<Self> {
        Self::from_json(STANDARD_TRAJECTORIES)
    }

    /// Loads a library from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or its content is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpliceIoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let library = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), "Loaded trajectory library");
        Ok(library)
    }

    /// Parses a library from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceIoError::Trajectory`] if the version is unsupported, a
    /// path is missing, empty or unknown, or a joint value is not finite.
    pub fn from_json(text: &str) -> IoResult<Self> {
        let mut file: TrajectoryFile = serde_json::from_str(text)?;
        if file.version != TRAJECTORY_FORMAT_VERSION {
            return Err(SpliceIoError::trajectory(format!(
                "unsupported version {} (expected {TRAJECTORY_FORMAT_VERSION})",
                file.version
            )));
        }

        let mut trajectories = Vec::with_capacity(TrajectoryKind::ALL.len());
        for kind in TrajectoryKind::ALL {
            let Some(joints) = file.trajectories.remove(kind.key()) else {
                return Err(SpliceIoError::trajectory(format!("missing path {}", kind.key())));
            };
            if joints.is_empty() {
                return Err(SpliceIoError::trajectory(format!("path {} is empty", kind.key())));
            }
            if joints.iter().flatten().any(|j| !j.is_finite()) {
                return Err(SpliceIoError::trajectory(format!(
                    "path {} has a non-finite joint value",
                    kind.key()
                )));
            }
            trajectories.push(Trajectory::new(
                kind,
                joints.into_iter().map(JointPose::new).collect(),
            ));
        }

        if let Some(unknown) = file.trajectories.keys().next() {
            return Err(SpliceIoError::trajectory(format!("unknown path {unknown}")));
        }
        Ok(Self { trajectories })
    }

    /// The path of the given kind.
    #[must_use]
    pub fn get(&self, kind: TrajectoryKind) -> &Trajectory {
        &self.trajectories[kind as usize]
    }

    /// Iterates the paths in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }
}
