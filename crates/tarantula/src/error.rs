//! Error types for fault localization

use thiserror::Error;

/// Result type for fault localization operations
pub type TarantulaResult<T> = Result<T, TarantulaError>;

/// Errors that can occur during fault localization
#[derive(Debug, Error)]
pub enum TarantulaError {
    /// Invalid or inconsistent outcome counts for one run
    #[error("Invalid run counts: {message}")]
    InvalidRunCounts {
        /// Error message
        message: String,
    },

    /// The external test runner could not produce a result for a test
    #[error("External tool failed for test '{test}': {message}")]
    ExternalTool {
        /// Test identifier the runner was asked to execute
        test: String,
        /// Error message
        message: String,
    },

    /// A raw test-outcome or coverage report could not be decoded
    #[error("Could not parse report for test '{test}': {message}")]
    ReportParse {
        /// Test identifier the report belongs to
        test: String,
        /// Error message
        message: String,
    },

    /// The Tarantula formula is undefined for the whole session
    ///
    /// Raised when either global total is zero: without at least one passing
    /// and one failing run the formula carries no information, and defaulting
    /// to 0 or 1 would misstate confidence.
    #[error(
        "Suspiciousness is undefined: totals are {total_passed} passed, {total_failed} failed \
         (need at least one of each)"
    )]
    UndefinedSuspiciousness {
        /// Sum of passed counts over all accepted runs
        total_passed: f64,
        /// Sum of failed counts over all accepted runs
        total_failed: f64,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TarantulaError {
    /// Create an invalid-run-counts error
    #[must_use]
    pub fn invalid_run_counts(message: impl Into<String>) -> Self {
        Self::InvalidRunCounts {
            message: message.into(),
        }
    }

    /// Create an external-tool error for a test
    #[must_use]
    pub fn external_tool(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            test: test.into(),
            message: message.into(),
        }
    }

    /// Create a report-parse error for a test
    #[must_use]
    pub fn report_parse(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReportParse {
            test: test.into(),
            message: message.into(),
        }
    }

    /// Whether this error invalidates only a single run
    ///
    /// Per-run errors exclude exactly that run from aggregation; the session
    /// continues with the remaining runs.
    #[must_use]
    pub const fn is_per_run(&self) -> bool {
        matches!(
            self,
            Self::InvalidRunCounts { .. } | Self::ExternalTool { .. } | Self::ReportParse { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_run_counts_error() {
        let err = TarantulaError::invalid_run_counts("failures exceed total");
        assert!(err.to_string().contains("Invalid run counts"));
        assert!(err.to_string().contains("failures exceed total"));
        assert!(err.is_per_run());
    }

    #[test]
    fn test_external_tool_error() {
        let err = TarantulaError::external_tool("testAdd", "mvn exited with status 1");
        assert!(err.to_string().contains("testAdd"));
        assert!(err.is_per_run());
    }

    #[test]
    fn test_report_parse_error() {
        let err = TarantulaError::report_parse("testAdd", "missing testsuite element");
        assert!(err.to_string().contains("Could not parse"));
        assert!(err.is_per_run());
    }

    #[test]
    fn test_undefined_suspiciousness_is_not_per_run() {
        let err = TarantulaError::UndefinedSuspiciousness {
            total_passed: 3.0,
            total_failed: 0.0,
        };
        assert!(err.to_string().contains("undefined"));
        assert!(!err.is_per_run());
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TarantulaError = io_err.into();
        assert!(err.to_string().contains("I/O"));
        assert!(!err.is_per_run());
    }
}
