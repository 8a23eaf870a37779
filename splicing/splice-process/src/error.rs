//! Error types for process construction.

use thiserror::Error;

/// Errors that can occur while building a drilling process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The located rails do not match the configured assembly.
    #[error("expected {expected} rails, located {found}")]
    RailCount {
        /// Configured number of rails.
        expected: usize,
        /// Number of distinct rail coordinates found.
        found: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration value for {field}: {message}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Why the value is rejected.
        message: String,
    },
}

impl ProcessError {
    /// Create an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

/// Result type for process construction.
pub type Result<T> = std::result::Result<T, ProcessError>;
