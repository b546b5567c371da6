//! CLI argument definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Tarantula: rank source lines by fault suspiciousness from Maven test runs
///
/// Runs each named test method on its own with `mvn test`, correlates the
/// per-run pass/fail outcome with the jacoco line coverage of the target
/// source file, and writes a ranked CSV report.
#[derive(Parser, Debug)]
#[command(name = "tarantula")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Root directory of the Maven project under diagnosis
    pub project_root: PathBuf,

    /// Java package of the target source file (dot separated)
    pub package: String,

    /// Target source file name, e.g. Calculator.java
    pub source_file: String,

    /// Fully qualified test class whose methods will be run
    pub test_class: String,

    /// Comma-separated test method names, run one at a time in order
    pub tests: String,

    /// Directory the report file is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Write the report as JSON instead of CSV
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,
}

impl Cli {
    /// The ordered list of test methods to run, one run per method
    #[must_use]
    pub fn test_methods(&self) -> Vec<String> {
        self.tests
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Color argument for clap
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// Detect terminal support
    Auto,
    /// Always emit colors
    Always,
    /// Never emit colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
