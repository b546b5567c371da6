//! Tarantula CLI: spectrum-based fault localization over Maven test runs
//!
//! ## Usage
//!
//! ```bash
//! tarantula /work/calc com.example.calc Calculator.java \
//!     com.example.calc.CalculatorTest testAdd,testSub,testMul
//! ```
//!
//! Each test method is run on its own; per-run failures are reported and
//! skipped, and the session fails only when no run at all could be
//! aggregated.

use clap::Parser;
use std::process::ExitCode;
use tarantula::Session;
use tarantula_cli::{sink, Cli, CliConfig, CliError, CliResult, MavenRunner, ProgressReporter, Verbosity};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    let tests = cli.test_methods();
    if tests.is_empty() {
        return Err(CliError::invalid_argument(
            "at least one test method is required",
        ));
    }

    let mut reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let mut runner = MavenRunner::new(
        &cli.project_root,
        &cli.package,
        &cli.source_file,
        &cli.test_class,
    );

    let mut session = Session::new();
    reporter.header(&format!("Localizing faults in {}", cli.source_file));
    reporter.start_progress(tests.len() as u64, "Starting...");

    for test in &tests {
        reporter.set_message(test);
        if session.run_one(&mut runner, test) {
            reporter.success(test);
        } else if let Some(failure) = session.failures().last() {
            reporter.failure(&failure.error.to_string());
        }
        reporter.increment(1);
    }
    reporter.finish();
    reporter.summary(session.runs_ingested(), session.failures().len());

    if session.runs_ingested() == 0 {
        return Err(CliError::NoRunsIngested {
            failed: session.failures().len(),
        });
    }

    let report = session.report();
    if !report.is_complete() {
        let totals = report.totals();
        reporter.warning(&format!(
            "suspiciousness is undefined: {} passed / {} failed in total; \
             report lists coverage only",
            totals.total_passed, totals.total_failed
        ));
    }

    if !config.verbosity.is_quiet() {
        println!("Tarantula Report for {}", cli.source_file);
        print!("{}", report.to_csv());
    }

    let path = sink::write_report(&report, &cli.source_file, &cli.output, config.json)?;
    reporter.success(&format!("report written to {}", path.display()));
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
        .with_json(cli.json)
}

fn init_tracing(verbosity: Verbosity) {
    let default_filter = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info",
        Verbosity::Debug => "debug",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
