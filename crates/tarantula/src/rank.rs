//! Deterministic ranking of scored lines
//!
//! The report order is a strict total order: defined scores first, highest
//! suspiciousness first, ties and the undefined group by line number
//! ascending. Comparing through [`f64::total_cmp`] keeps the order total
//! even for pathological float values, which the naive `>` comparator the
//! formula invites would not be.

use crate::score::ScoredLine;
use std::cmp::Ordering;

/// Strict total order over scored lines
///
/// Primary key: suspiciousness descending. Secondary key: line number
/// ascending. Lines with undefined suspiciousness sort after every defined
/// score, among themselves by line number.
#[must_use]
pub fn compare_scored(a: &ScoredLine, b: &ScoredLine) -> Ordering {
    match (a.suspiciousness, b.suspiciousness) {
        (Some(sa), Some(sb)) => sb
            .total_cmp(&sa)
            .then_with(|| a.line_number.cmp(&b.line_number)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.line_number.cmp(&b.line_number),
    }
}

/// Sort scored lines into report order
///
/// Stable and deterministic for identical input.
#[must_use]
pub fn rank(mut lines: Vec<ScoredLine>) -> Vec<ScoredLine> {
    lines.sort_by(compare_scored);
    lines
}
