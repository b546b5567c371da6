//! Report sink: writes the ranked report to disk
//!
//! The file keeps the original tool's naming scheme,
//! `Tarantula Report for <file>.csv`, so downstream scripts keep working.

use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use tarantula::FaultReport;

/// File name the report is written under
#[must_use]
pub fn report_file_name(source_file: &str, json: bool) -> String {
    let ext = if json { "json" } else { "csv" };
    format!("Tarantula Report for {source_file}.{ext}")
}

/// Write the report into `output_dir`, returning the path written
pub fn write_report(
    report: &FaultReport,
    source_file: &str,
    output_dir: &Path,
    json: bool,
) -> CliResult<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(report_file_name(source_file, json));

    let body = if json {
        let mut body = serde_json::to_string_pretty(report)
            .map_err(|e| CliError::report_write(path.display().to_string(), e.to_string()))?;
        body.push('\n');
        body
    } else {
        report.to_csv()
    };

    std::fs::write(&path, body)
        .map_err(|e| CliError::report_write(path.display().to_string(), e.to_string()))?;
    Ok(path)
}
