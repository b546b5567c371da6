//! Tarantula: spectrum-based fault localization
//!
//! Ranks source lines by estimated likelihood of containing a fault, using
//! the classical Tarantula suspiciousness formula over the pass/fail
//! outcomes and line coverage of many independent test executions.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  TARANTULA PIPELINE                                            │
//! ├────────────────────────────────────────────────────────────────┤
//! │  TestExecutor → RunRecord → CoverageAggregator → ScoredLine    │
//! │                                   ↓                            │
//! │                             FaultReport (ranked)               │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never executes tests or parses report files itself: a
//! [`TestExecutor`] implementation (real build tool or deterministic fake)
//! produces per-run outcome counts and executed-line sets, and the caller
//! hands the final [`FaultReport`] to whatever sink it wants.
//!
//! ## Example
//!
//! ```
//! use tarantula::{CoverageAggregator, FaultReport, RunRecord};
//!
//! let mut agg = CoverageAggregator::new();
//! agg.ingest(RunRecord::new(1.0, 0.0, [3, 4].into())?);
//! agg.ingest(RunRecord::new(0.0, 1.0, [4, 5].into())?);
//!
//! let report = FaultReport::from_aggregator(&agg);
//! assert_eq!(report.entries()[0].line_number, 5); // only failing runs → 1.0
//! # Ok::<(), tarantula::TarantulaError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod aggregate;
mod error;
mod rank;
mod report;
mod run;
mod score;
mod session;

pub use aggregate::{CoverageAggregator, GlobalTotals, LineStat};
pub use error::{TarantulaError, TarantulaResult};
pub use rank::{compare_scored, rank};
pub use report::{FaultReport, REPORT_HEADER, UNDEFINED_MARKER};
pub use run::{RawTestCounts, RunRecord};
pub use score::{score_lines, suspiciousness, ScoredLine};
pub use session::{RunFailure, Session, TestExecution, TestExecutor};
