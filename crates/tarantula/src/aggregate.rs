//! Coverage aggregation across test runs
//!
//! Folds a stream of [`RunRecord`]s into per-line pass/fail weights and
//! global totals. The fold is additive, so it is commutative and associative:
//! the final state does not depend on ingestion order, and independent
//! partial aggregates can be merged at the end (map-reduce).

use crate::run::RunRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated pass/fail evidence for one source line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStat {
    /// Sum of passed counts over runs that executed this line
    pub passed_weight: f64,
    /// Sum of failed counts over runs that executed this line
    pub failed_weight: f64,
}

/// Session-wide pass/fail totals, summed once per accepted run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalTotals {
    /// Sum of passed counts over all accepted runs
    pub total_passed: f64,
    /// Sum of failed counts over all accepted runs
    pub total_failed: f64,
}

/// Aggregator folding run records into line statistics
///
/// Constructed fresh per session and owned by the caller driving that
/// session; there is no process-wide state, so concurrent sessions are safe.
/// A line statistic exists iff the line was executed in at least one
/// accepted run, and totals move on every accepted run even when its
/// coverage set is empty.
#[derive(Debug, Clone, Default)]
pub struct CoverageAggregator {
    line_stats: BTreeMap<u32, LineStat>,
    totals: GlobalTotals,
    runs_ingested: usize,
}

impl CoverageAggregator {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run record into the aggregate
    ///
    /// Adds the run's passed/failed counts to every executed line's weights
    /// and, independently of coverage, to the global totals. The record was
    /// validated at construction, so ingestion cannot fail and is atomic per
    /// run.
    pub fn ingest(&mut self, record: RunRecord) {
        for &line in record.executed_lines() {
            let stat = self.line_stats.entry(line).or_default();
            stat.passed_weight += record.num_passed();
            stat.failed_weight += record.num_failed();
        }

        self.totals.total_passed += record.num_passed();
        self.totals.total_failed += record.num_failed();
        self.runs_ingested += 1;

        tracing::debug!(
            num_passed = record.num_passed(),
            num_failed = record.num_failed(),
            lines_covered = record.executed_lines().len(),
            runs_ingested = self.runs_ingested,
            "ingested run record"
        );
    }

    /// Merge another aggregate into this one
    ///
    /// Uses the same additive rule as [`ingest`](Self::ingest), so partial
    /// aggregates built by parallel workers combine to the same final state
    /// as sequential ingestion.
    pub fn merge(&mut self, other: Self) {
        for (line, stat) in other.line_stats {
            let entry = self.line_stats.entry(line).or_default();
            entry.passed_weight += stat.passed_weight;
            entry.failed_weight += stat.failed_weight;
        }
        self.totals.total_passed += other.totals.total_passed;
        self.totals.total_failed += other.totals.total_failed;
        self.runs_ingested += other.runs_ingested;
    }

    /// Per-line statistics, keyed by line number
    #[must_use]
    pub const fn line_stats(&self) -> &BTreeMap<u32, LineStat> {
        &self.line_stats
    }

    /// Global pass/fail totals
    #[must_use]
    pub const fn totals(&self) -> GlobalTotals {
        self.totals
    }

    /// Number of runs accepted so far
    #[must_use]
    pub const fn runs_ingested(&self) -> usize {
        self.runs_ingested
    }

    /// Whether any run has been accepted
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.runs_ingested == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn run(passed: f64, failed: f64, lines: &[u32]) -> RunRecord {
        RunRecord::new(passed, failed, lines.iter().copied().collect()).unwrap()
    }

    mod ingest_tests {
        use super::*;

        #[test]
        fn test_empty_aggregator() {
            let agg = CoverageAggregator::new();
            assert!(agg.is_empty());
            assert!(agg.line_stats().is_empty());
            assert_eq!(agg.totals(), GlobalTotals::default());
        }

        #[test]
        fn test_first_observation_creates_stat() {
            let mut agg = CoverageAggregator::new();
            agg.ingest(run(2.0, 1.0, &[10]));

            let stat = agg.line_stats()[&10];
            assert_eq!(stat.passed_weight, 2.0);
            assert_eq!(stat.failed_weight, 1.0);
        }

        #[test]
        fn test_later_runs_add_weights() {
            let mut agg = CoverageAggregator::new();
            agg.ingest(run(2.0, 0.0, &[10]));
            agg.ingest(run(1.0, 3.0, &[10]));

            let stat = agg.line_stats()[&10];
            assert_eq!(stat.passed_weight, 3.0);
            assert_eq!(stat.failed_weight, 3.0);
        }

        #[test]
        fn test_totals_independent_of_coverage() {
            let mut agg = CoverageAggregator::new();
            agg.ingest(run(2.0, 1.0, &[]));

            assert!(agg.line_stats().is_empty());
            assert_eq!(agg.totals().total_passed, 2.0);
            assert_eq!(agg.totals().total_failed, 1.0);
            assert_eq!(agg.runs_ingested(), 1);
        }

        #[test]
        fn test_uncovered_line_never_appears() {
            let mut agg = CoverageAggregator::new();
            agg.ingest(run(1.0, 0.0, &[3, 4]));
            agg.ingest(run(0.0, 1.0, &[4, 5]));

            assert!(!agg.line_stats().contains_key(&99));
            let observed: Vec<u32> = agg.line_stats().keys().copied().collect();
            assert_eq!(observed, vec![3, 4, 5]);
        }

        #[test]
        fn test_worked_example_weights() {
            let mut agg = CoverageAggregator::new();
            agg.ingest(run(1.0, 0.0, &[3, 4]));
            agg.ingest(run(0.0, 1.0, &[4, 5]));

            assert_eq!(agg.totals().total_passed, 1.0);
            assert_eq!(agg.totals().total_failed, 1.0);
            assert_eq!(agg.line_stats()[&3].passed_weight, 1.0);
            assert_eq!(agg.line_stats()[&3].failed_weight, 0.0);
            assert_eq!(agg.line_stats()[&4].passed_weight, 1.0);
            assert_eq!(agg.line_stats()[&4].failed_weight, 1.0);
            assert_eq!(agg.line_stats()[&5].passed_weight, 0.0);
            assert_eq!(agg.line_stats()[&5].failed_weight, 1.0);
        }
    }

    mod merge_tests {
        use super::*;

        #[test]
        fn test_merge_equals_sequential_ingest() {
            let runs = [
                run(1.0, 0.0, &[3, 4]),
                run(0.0, 1.0, &[4, 5]),
                run(2.0, 2.0, &[5]),
            ];

            let mut sequential = CoverageAggregator::new();
            for r in runs.clone() {
                sequential.ingest(r);
            }

            let mut left = CoverageAggregator::new();
            left.ingest(runs[0].clone());
            let mut right = CoverageAggregator::new();
            right.ingest(runs[1].clone());
            right.ingest(runs[2].clone());
            left.merge(right);

            assert_eq!(left.line_stats(), sequential.line_stats());
            assert_eq!(left.totals(), sequential.totals());
            assert_eq!(left.runs_ingested(), sequential.runs_ingested());
        }

        #[test]
        fn test_merge_into_empty() {
            let mut full = CoverageAggregator::new();
            full.ingest(run(1.0, 1.0, &[7]));

            let mut empty = CoverageAggregator::new();
            empty.merge(full.clone());

            assert_eq!(empty.line_stats(), full.line_stats());
            assert_eq!(empty.totals(), full.totals());
        }
    }

    fn run_strategy() -> impl Strategy<Value = RunRecord> {
        (
            0u32..16,
            0u32..16,
            proptest::collection::btree_set(1u32..64, 0..8),
        )
            .prop_map(|(passed, failed, lines)| {
                RunRecord::new(f64::from(passed), f64::from(failed), lines).unwrap()
            })
    }

    fn fold(runs: &[RunRecord]) -> CoverageAggregator {
        let mut agg = CoverageAggregator::new();
        for r in runs {
            agg.ingest(r.clone());
        }
        agg
    }

    proptest! {
        /// Ingesting a permutation of the same runs yields identical state
        #[test]
        fn prop_order_independence(
            runs in proptest::collection::vec(run_strategy(), 0..12)
        ) {
            let forward = fold(&runs);
            let mut reversed = runs.clone();
            reversed.reverse();
            let backward = fold(&reversed);

            prop_assert_eq!(forward.line_stats(), backward.line_stats());
            prop_assert_eq!(forward.totals(), backward.totals());
        }

        /// Splitting the stream and merging partial aggregates matches a
        /// single sequential fold
        #[test]
        fn prop_merge_associativity(
            runs in proptest::collection::vec(run_strategy(), 0..12),
            split in 0usize..12,
        ) {
            let split = split.min(runs.len());
            let sequential = fold(&runs);

            let mut merged = fold(&runs[..split]);
            merged.merge(fold(&runs[split..]));

            prop_assert_eq!(merged.line_stats(), sequential.line_stats());
            prop_assert_eq!(merged.totals(), sequential.totals());
            prop_assert_eq!(merged.runs_ingested(), sequential.runs_ingested());
        }

        /// Totals are the exact sums of per-run counts
        #[test]
        fn prop_conservation(
            runs in proptest::collection::vec(run_strategy(), 0..12)
        ) {
            let agg = fold(&runs);
            let sum_passed: f64 = runs.iter().map(RunRecord::num_passed).sum();
            let sum_failed: f64 = runs.iter().map(RunRecord::num_failed).sum();

            prop_assert_eq!(agg.totals().total_passed, sum_passed);
            prop_assert_eq!(agg.totals().total_failed, sum_failed);
        }

        /// No line accumulates more weight than the session total
        #[test]
        fn prop_line_weights_bounded_by_totals(
            runs in proptest::collection::vec(run_strategy(), 0..12)
        ) {
            let agg = fold(&runs);
            let totals = agg.totals();
            for stat in agg.line_stats().values() {
                prop_assert!(stat.passed_weight <= totals.total_passed);
                prop_assert!(stat.failed_weight <= totals.total_failed);
            }
        }

        /// A line statistic exists iff some accepted run executed the line
        #[test]
        fn prop_coverage_closure(
            runs in proptest::collection::vec(run_strategy(), 0..12)
        ) {
            let agg = fold(&runs);
            let executed: BTreeSet<u32> = runs
                .iter()
                .flat_map(|r| r.executed_lines().iter().copied())
                .collect();
            let observed: BTreeSet<u32> = agg.line_stats().keys().copied().collect();

            prop_assert_eq!(observed, executed);
        }
    }
}
