//! Surefire test-outcome report decoding
//!
//! After `mvn test` runs a single test class, exactly one XML report is
//! expected under `target/surefire-reports/`. Only the `tests`, `failures`
//! and `skipped` attributes of its `<testsuite>` element matter here; the
//! per-case detail is ignored.

use regex::Regex;
use std::path::{Path, PathBuf};
use tarantula::{RawTestCounts, TarantulaError, TarantulaResult};

/// Decode the outcome counts for one test run from the surefire report dir
///
/// Per-run error: a missing or malformed report excludes only this run.
pub fn decode_counts(project_root: &Path, test: &str) -> TarantulaResult<RawTestCounts> {
    let dir = project_root.join("target").join("surefire-reports");
    let report = find_single_report(&dir).map_err(|m| TarantulaError::report_parse(test, m))?;
    let xml = std::fs::read_to_string(&report).map_err(|e| {
        TarantulaError::report_parse(test, format!("could not read {}: {e}", report.display()))
    })?;
    parse_testsuite(&xml).map_err(|m| TarantulaError::report_parse(test, m))
}

/// Locate the single XML report a one-class run leaves behind
fn find_single_report(dir: &Path) -> Result<PathBuf, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("could not scan {}: {e}", dir.display()))?;

    let mut reports: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "xml"))
        .collect();

    match reports.len() {
        1 => Ok(reports.remove(0)),
        0 => Err(format!("no XML report found in {}", dir.display())),
        n => Err(format!(
            "expected exactly one XML report in {}, found {n}",
            dir.display()
        )),
    }
}

/// Extract the outcome counts from a surefire testsuite document
pub fn parse_testsuite(xml: &str) -> Result<RawTestCounts, String> {
    let tag_re = Regex::new(r"<testsuite\b[^>]*>").map_err(|e| e.to_string())?;
    let tag = tag_re
        .find(xml)
        .ok_or("missing testsuite element")?
        .as_str();

    Ok(RawTestCounts::new(
        attr_u64(tag, "tests")?,
        attr_u64(tag, "failures")?,
        attr_u64(tag, "skipped")?,
    ))
}

/// Read one numeric attribute out of an element tag
fn attr_u64(tag: &str, name: &str) -> Result<u64, String> {
    let re = Regex::new(&format!(r#"\b{name}="(\d+)""#)).map_err(|e| e.to_string())?;
    let value = re
        .captures(tag)
        .and_then(|c| c.get(1))
        .ok_or_else(|| format!("testsuite element has no numeric '{name}' attribute"))?;
    value
        .as_str()
        .parse()
        .map_err(|e| format!("invalid '{name}' attribute: {e}"))
}
