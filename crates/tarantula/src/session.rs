//! Fault localization session
//!
//! A session owns one [`CoverageAggregator`], drives an external test
//! executor once per test identifier, and is queried exactly once for the
//! final ranked report. State lives in the session value, not in globals,
//! so concurrent sessions never interfere.

use crate::aggregate::CoverageAggregator;
use crate::error::{TarantulaError, TarantulaResult};
use crate::report::FaultReport;
use crate::run::{RawTestCounts, RunRecord};
use std::collections::BTreeSet;

/// One test execution's decoded output: outcome counts plus coverage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestExecution {
    /// Outcome counts from the test report
    pub counts: RawTestCounts,
    /// Lines of the target source file executed during the run
    pub executed_lines: BTreeSet<u32>,
}

/// Capability interface over the external test runner and report decoder
///
/// Implementations run one named test case end to end and hand back its
/// decoded outcome. Real implementations shell out to a build tool; tests
/// substitute deterministic fakes.
pub trait TestExecutor {
    /// Execute one test case and decode its outcome and coverage
    fn run_test(&mut self, test: &str) -> TarantulaResult<TestExecution>;
}

/// A run that failed before it could be aggregated
#[derive(Debug)]
pub struct RunFailure {
    /// Test identifier of the failed run
    pub test: String,
    /// What went wrong
    pub error: TarantulaError,
}

/// One fault localization session over a sequence of test executions
#[derive(Debug, Default)]
pub struct Session {
    aggregator: CoverageAggregator,
    failures: Vec<RunFailure>,
}

impl Session {
    /// Start a session with empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one test via the executor and fold its run into the session
    ///
    /// Per-run errors (tool failure, unparseable report, inconsistent
    /// counts) exclude exactly that run: they are recorded and `false` is
    /// returned, but the session stays usable for the remaining tests.
    pub fn run_one<E: TestExecutor>(&mut self, executor: &mut E, test: &str) -> bool {
        match executor
            .run_test(test)
            .and_then(|execution| RunRecord::from_counts(execution.counts, execution.executed_lines))
        {
            Ok(record) => {
                self.aggregator.ingest(record);
                tracing::info!(test, "run aggregated");
                true
            }
            Err(error) => {
                tracing::warn!(test, %error, "run excluded from aggregation");
                self.failures.push(RunFailure {
                    test: test.to_string(),
                    error,
                });
                false
            }
        }
    }

    /// Execute every test in order, one run per test method
    ///
    /// Per-run granularity is load-bearing for the scoring statistics:
    /// batching several test methods into one run would change the totals.
    /// Returns the number of runs successfully aggregated.
    pub fn run_all<E, I, S>(&mut self, executor: &mut E, tests: I) -> usize
    where
        E: TestExecutor,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = 0;
        for test in tests {
            if self.run_one(executor, test.as_ref()) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Ingest an already-built run record directly
    pub fn ingest(&mut self, record: RunRecord) {
        self.aggregator.ingest(record);
    }

    /// The aggregator's current state (for diagnostics)
    #[must_use]
    pub const fn aggregator(&self) -> &CoverageAggregator {
        &self.aggregator
    }

    /// Runs excluded from aggregation, with their causes
    #[must_use]
    pub fn failures(&self) -> &[RunFailure] {
        &self.failures
    }

    /// Number of runs accepted into the aggregate
    #[must_use]
    pub const fn runs_ingested(&self) -> usize {
        self.aggregator.runs_ingested()
    }

    /// Produce the final ranked report
    ///
    /// Always succeeds; when the formula is undefined for this session the
    /// report is marked incomplete and every entry carries the undefined
    /// marker.
    #[must_use]
    pub fn report(&self) -> FaultReport {
        FaultReport::from_aggregator(&self.aggregator)
    }

    /// Produce the final ranked report, failing when scores are undefined
    ///
    /// Strict variant for callers that treat an undefined formula as an
    /// error rather than an incomplete report.
    pub fn try_report(&self) -> TarantulaResult<FaultReport> {
        let report = self.report();
        if report.is_complete() || report.is_empty() {
            Ok(report)
        } else {
            let totals = report.totals();
            Err(TarantulaError::UndefinedSuspiciousness {
                total_passed: totals.total_passed,
                total_failed: totals.total_failed,
            })
        }
    }
}
