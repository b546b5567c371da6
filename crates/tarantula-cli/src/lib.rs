//! Tarantula CLI Library
//!
//! Command-line driver for the Tarantula fault localization engine: runs
//! Maven test methods one at a time, decodes the surefire and jacoco
//! reports they leave behind, and writes the ranked suspiciousness report.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod jacoco;
pub mod maven;
mod output;
pub mod sink;
pub mod surefire;

pub use commands::{Cli, ColorArg};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use maven::MavenRunner;
pub use output::ProgressReporter;
