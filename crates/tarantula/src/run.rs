//! Run record construction and validation
//!
//! One `RunRecord` captures everything the engine needs from a single test
//! execution: how many cases passed, how many failed, and which source lines
//! ran. Records are validated on construction and immutable afterwards, so
//! ingestion can never partially apply a bad run.

use crate::error::{TarantulaError, TarantulaResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw outcome counts decoded from one test execution's report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTestCounts {
    /// Total number of test cases executed
    pub test_total: u64,
    /// Number of failed test cases
    pub failures_total: u64,
    /// Number of skipped test cases
    pub skipped_total: u64,
}

impl RawTestCounts {
    /// Create raw counts
    #[must_use]
    pub const fn new(test_total: u64, failures_total: u64, skipped_total: u64) -> Self {
        Self {
            test_total,
            failures_total,
            skipped_total,
        }
    }
}

/// One test execution's validated contribution to the aggregate
///
/// Immutable once built; consumed by value by
/// [`CoverageAggregator::ingest`](crate::CoverageAggregator::ingest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    num_passed: f64,
    num_failed: f64,
    executed_lines: BTreeSet<u32>,
}

impl RunRecord {
    /// Build a record from raw report counts and a set of executed lines
    ///
    /// `num_passed` is derived as `test_total - failures_total -
    /// skipped_total`. Fails with
    /// [`TarantulaError::InvalidRunCounts`] when the counts are
    /// inconsistent; the run is rejected whole, never partially applied.
    pub fn from_counts(
        counts: RawTestCounts,
        executed_lines: BTreeSet<u32>,
    ) -> TarantulaResult<Self> {
        let claimed = counts.failures_total + counts.skipped_total;
        if counts.test_total < claimed {
            return Err(TarantulaError::invalid_run_counts(format!(
                "{} failures + {} skipped exceed {} tests run",
                counts.failures_total, counts.skipped_total, counts.test_total
            )));
        }

        let num_passed = (counts.test_total - claimed) as f64;
        let num_failed = counts.failures_total as f64;
        Self::new(num_passed, num_failed, executed_lines)
    }

    /// Build a record from already-derived pass/fail weights
    ///
    /// Weights must be finite and non-negative; line numbers must be
    /// positive.
    pub fn new(
        num_passed: f64,
        num_failed: f64,
        executed_lines: BTreeSet<u32>,
    ) -> TarantulaResult<Self> {
        if !num_passed.is_finite() || num_passed < 0.0 {
            return Err(TarantulaError::invalid_run_counts(format!(
                "passed count {num_passed} is not a non-negative finite number"
            )));
        }
        if !num_failed.is_finite() || num_failed < 0.0 {
            return Err(TarantulaError::invalid_run_counts(format!(
                "failed count {num_failed} is not a non-negative finite number"
            )));
        }
        if executed_lines.contains(&0) {
            return Err(TarantulaError::invalid_run_counts(
                "executed line numbers must be positive",
            ));
        }

        Ok(Self {
            num_passed,
            num_failed,
            executed_lines,
        })
    }

    /// Number of test cases that passed in this run
    #[must_use]
    pub const fn num_passed(&self) -> f64 {
        self.num_passed
    }

    /// Number of test cases that failed in this run
    #[must_use]
    pub const fn num_failed(&self) -> f64 {
        self.num_failed
    }

    /// Source lines executed during this run
    #[must_use]
    pub const fn executed_lines(&self) -> &BTreeSet<u32> {
        &self.executed_lines
    }
}
