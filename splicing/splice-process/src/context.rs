//! Run-scoped context shared by the pose and routing stages.

use splice_types::RailSet;

use crate::config::ProcessConfig;
use crate::error::{ProcessError, Result};

/// Configuration plus the rails located for one run.
///
/// Owns the rail-1 reference coordinate that anchors every external-axis
/// offset of the run.
#[derive(Debug, Clone)]
pub struct RunContext<'a> {
    config: &'a ProcessConfig,
    rails: RailSet,
    reference_y: f64,
}

impl<'a> RunContext<'a> {
    /// Creates a context from a located rail set.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::RailCount`] if the rail set is empty, since
    /// there is then no reference coordinate.
    pub fn new(config: &'a ProcessConfig, rails: RailSet) -> Result<Self> {
        let reference_y = rails.reference().ok_or(ProcessError::RailCount {
            expected: config.expected_rail_count(),
            found: 0,
        })?;
        Ok(Self {
            config,
            rails,
            reference_y,
        })
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &'a ProcessConfig {
        self.config
    }

    /// The located rails.
    #[must_use]
    pub const fn rails(&self) -> &RailSet {
        &self.rails
    }

    /// Reference coordinate of rail 1 (external axis at zero).
    #[must_use]
    pub const fn reference_y(&self) -> f64 {
        self.reference_y
    }

    /// Consumes the context, returning the rail set.
    #[must_use]
    pub fn into_rails(self) -> RailSet {
        self.rails
    }
}
