//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Every queued test run failed, nothing to report
    #[error("No test runs were successfully aggregated ({failed} failed); nothing to report")]
    NoRunsIngested {
        /// Number of runs that failed
        failed: usize,
    },

    /// Report write error
    #[error("Could not write report to {path}: {message}")]
    ReportWrite {
        /// Destination path
        path: String,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fault localization engine error
    #[error("Tarantula error: {0}")]
    Tarantula(#[from] tarantula::TarantulaError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a report write error
    #[must_use]
    pub fn report_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReportWrite {
            path: path.into(),
            message: message.into(),
        }
    }
}
