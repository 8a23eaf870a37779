//! Error types for splice I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for splice I/O operations.
pub type IoResult<T> = Result<T, SpliceIoError>;

/// Errors that can occur while reading descriptors or writing a process.
#[derive(Debug, Error)]
pub enum SpliceIoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A descriptor parameter could not be parsed.
    #[error("fastener {fastener}: invalid parameter {slot} ({value:?}): {message}")]
    InvalidParameter {
        /// Fastener instance name.
        fastener: String,
        /// Zero-based parameter slot.
        slot: usize,
        /// Raw parameter text.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A record of a parameter export is malformed.
    #[error("line {line}: {message}")]
    MalformedRecord {
        /// One-based line number.
        line: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// Neither attaching to nor launching a CAD session succeeded.
    #[error("CAD session unavailable (attach: {attach}; launch: {launch})")]
    SessionUnavailable {
        /// Why attaching failed.
        attach: String,
        /// Why launching failed.
        launch: String,
    },

    /// Trajectory data is missing or inconsistent.
    #[error("invalid trajectory data: {message}")]
    Trajectory {
        /// Description of what was invalid.
        message: String,
    },

    /// The process document could not be written.
    #[error("XML error: {message}")]
    Xml {
        /// Description of the failure.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpliceIoError {
    /// Create an `InvalidParameter` error.
    #[must_use]
    pub fn invalid_parameter(
        fastener: impl Into<String>,
        slot: usize,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            fastener: fastener.into(),
            slot,
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a `MalformedRecord` error.
    #[must_use]
    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create a `Trajectory` error.
    #[must_use]
    pub fn trajectory(message: impl Into<String>) -> Self {
        Self::Trajectory {
            message: message.into(),
        }
    }

    /// Create an `Xml` error.
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }
}
