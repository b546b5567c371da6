//! Tarantula suspiciousness scoring
//!
//! For a line with failed weight `f` and passed weight `p`, with session
//! totals `F` and `P`:
//!
//! ```text
//! suspiciousness = (f/F) / (p/P + f/F)
//! ```
//!
//! The score lies in `[0, 1]`: 1 means the line was exercised only by
//! failing runs, 0 only by passing runs. When either total is zero the
//! formula is undefined for every line; when a line carries no pass/fail
//! weight at all (executed only by all-skipped runs) it is undefined for
//! that line. Both cases are surfaced explicitly (`None` here,
//! [`TarantulaError::UndefinedSuspiciousness`] at the session boundary)
//! rather than silently defaulting to 0 or 1, since both would misstate
//! confidence.
//!
//! [`TarantulaError::UndefinedSuspiciousness`]: crate::TarantulaError::UndefinedSuspiciousness

use crate::aggregate::{CoverageAggregator, GlobalTotals, LineStat};
use serde::{Deserialize, Serialize};

/// One line's suspiciousness, derived at report time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredLine {
    /// Source line number
    pub line_number: u32,
    /// Tarantula score in `[0, 1]`, or `None` when the formula is undefined
    pub suspiciousness: Option<f64>,
}

/// Compute one line's Tarantula score
///
/// Returns `None` when either global total is zero. Also `None` when both of
/// the line's weights are zero: a run with every test case skipped is valid
/// and still marks its lines as executed, but contributes no pass/fail
/// evidence, and `0/0` must never leak out as `NaN`.
#[must_use]
pub fn suspiciousness(stat: LineStat, totals: GlobalTotals) -> Option<f64> {
    if totals.total_failed <= 0.0 || totals.total_passed <= 0.0 {
        return None;
    }

    let fail_ratio = stat.failed_weight / totals.total_failed;
    let pass_ratio = stat.passed_weight / totals.total_passed;
    let denominator = pass_ratio + fail_ratio;
    if denominator == 0.0 {
        return None;
    }
    Some(fail_ratio / denominator)
}

/// Score every line the aggregator has observed
///
/// Output order follows the aggregator's line-number order; ranking is a
/// separate step.
#[must_use]
pub fn score_lines(aggregator: &CoverageAggregator) -> Vec<ScoredLine> {
    let totals = aggregator.totals();
    aggregator
        .line_stats()
        .iter()
        .map(|(&line_number, &stat)| ScoredLine {
            line_number,
            suspiciousness: suspiciousness(stat, totals),
        })
        .collect()
}
