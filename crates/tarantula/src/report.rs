//! Fault report model
//!
//! The ordered `(line, score)` sequence handed to whatever sink the caller
//! uses. The two-column header text and column order are part of the
//! interface and must not change.

use crate::aggregate::{CoverageAggregator, GlobalTotals};
use crate::rank::rank;
use crate::score::{score_lines, ScoredLine};
use serde::Serialize;
use std::fmt::Write;

/// Fixed report header: column order and text are part of the contract
pub const REPORT_HEADER: &str = "Line Number,Suspiciousness";

/// Marker emitted for lines whose suspiciousness is undefined
pub const UNDEFINED_MARKER: &str = "undefined";

/// Ranked fault localization report for one session
#[derive(Debug, Clone, Serialize)]
pub struct FaultReport {
    entries: Vec<ScoredLine>,
    totals: GlobalTotals,
    complete: bool,
}

impl FaultReport {
    /// Build the ranked report from an aggregator's final state
    ///
    /// When either global total is zero every score is undefined and the
    /// report is marked incomplete; the lines are still listed (ordered by
    /// line number) so the coverage evidence is not lost.
    #[must_use]
    pub fn from_aggregator(aggregator: &CoverageAggregator) -> Self {
        let totals = aggregator.totals();
        let entries = rank(score_lines(aggregator));
        let complete = totals.total_passed > 0.0 && totals.total_failed > 0.0;

        Self {
            entries,
            totals,
            complete,
        }
    }

    /// Ranked entries, most suspicious first
    #[must_use]
    pub fn entries(&self) -> &[ScoredLine] {
        &self.entries
    }

    /// Global totals the scores were derived from (for diagnostics)
    #[must_use]
    pub const fn totals(&self) -> GlobalTotals {
        self.totals
    }

    /// Whether the Tarantula formula was defined for this session
    ///
    /// `false` means no passing or no failing run was aggregated and every
    /// entry shows the undefined marker. A complete report may still mark
    /// individual lines undefined when they carry no pass/fail weight
    /// (executed only by all-skipped runs).
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the report as CSV with the fixed header
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(REPORT_HEADER);
        csv.push('\n');

        for entry in &self.entries {
            match entry.suspiciousness {
                Some(score) => {
                    let _ = writeln!(csv, "{},{}", entry.line_number, format_score(score));
                }
                None => {
                    let _ = writeln!(csv, "{},{UNDEFINED_MARKER}", entry.line_number);
                }
            }
        }

        csv
    }
}

/// Format a score so whole values keep a decimal point (`1.0`, not `1`)
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}
