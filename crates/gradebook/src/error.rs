//! Error types for gradebook.
//!
//! This module defines all error types used throughout the gradebook crate.
//! Validation errors are recoverable and shown to the user; storage errors
//! end the session.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gradebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A course with this code is already in the gradebook.
    #[error("course {code} already exists")]
    DuplicateCourse {
        /// Normalized course code.
        code: String,
    },

    /// No course with this code is in the gradebook.
    #[error("course {code} not found")]
    CourseNotFound {
        /// Normalized course code.
        code: String,
    },

    /// Score outside the closed range 0 to 10.
    #[error("invalid score {score}: must be between 0 and 10")]
    InvalidScore {
        /// The rejected score.
        score: f64,
    },

    /// Credit-hours below one.
    #[error("invalid credit {credit}: must be at least 1")]
    InvalidCredit {
        /// The rejected credit value.
        credit: i64,
    },

    /// A summary was requested with no courses recorded.
    #[error("no courses available")]
    EmptyGradebook,

    /// Text typed at a prompt could not be parsed.
    #[error("invalid {field}: {input:?} is not a number")]
    InvalidInput {
        /// Name of the prompted field.
        field: &'static str,
        /// What the user typed.
        input: String,
    },

    // === Storage Errors ===
    /// The saved gradebook exists but cannot be understood.
    #[error("corrupt gradebook data at {path}: {message}")]
    CorruptData {
        /// Path to the gradebook file.
        path: PathBuf,
        /// Description of what is wrong with the document.
        message: String,
    },

    /// Reading or writing the gradebook file failed.
    #[error("failed to {action} gradebook at {path}: {source}")]
    Storage {
        /// What was being attempted ("read", "write", ...).
        action: &'static str,
        /// Path to the gradebook file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gradebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate course error.
    #[must_use]
    pub fn duplicate(code: impl Into<String>) -> Self {
        Self::DuplicateCourse { code: code.into() }
    }

    /// Create a course not found error.
    #[must_use]
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::CourseNotFound { code: code.into() }
    }

    /// Create a corrupt data error.
    #[must_use]
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptData {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a storage error for a failed file operation.
    #[must_use]
    pub fn storage(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            action,
            path: path.into(),
            source,
        }
    }

    /// Check if the session can continue after this error.
    ///
    /// Validation failures are reported and retried. Anything touching the
    /// saved data or configuration is fatal, since carrying on risks losing
    /// the user's records.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCourse { .. }
                | Self::CourseNotFound { .. }
                | Self::InvalidScore { .. }
                | Self::InvalidCredit { .. }
                | Self::EmptyGradebook
                | Self::InvalidInput { .. }
        )
    }

    /// Check if this error means the course does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CourseNotFound { .. })
    }
}
