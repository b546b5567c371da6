//! Maven-backed test executor
//!
//! Runs one test method per invocation with `mvn clean test
//! -Dtest=Class#method`, then decodes the surefire outcome report and the
//! jacoco coverage report the build leaves under `target/`. The project's
//! pom must bind jacoco's `report` goal to the test phase so
//! `target/site/jacoco/jacoco.xml` exists after each run.

use crate::{jacoco, surefire};
use std::path::PathBuf;
use std::process::Command;
use tarantula::{TarantulaError, TarantulaResult, TestExecution, TestExecutor};

/// Test executor shelling out to Maven
#[derive(Debug)]
pub struct MavenRunner {
    project_root: PathBuf,
    package: String,
    source_file: String,
    test_class: String,
}

impl MavenRunner {
    /// Create a runner for one project and target source file
    #[must_use]
    pub fn new(
        project_root: impl Into<PathBuf>,
        package: impl Into<String>,
        source_file: impl Into<String>,
        test_class: impl Into<String>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            package: package.into(),
            source_file: source_file.into(),
            test_class: test_class.into(),
        }
    }

    /// The `-Dtest=...` selector Maven needs for one test method
    #[must_use]
    pub fn test_selector(&self, test: &str) -> String {
        format!("-Dtest={}#{test}", self.test_class)
    }

    /// Run `mvn clean test` for a single test method
    ///
    /// A failing test makes Maven exit non-zero; that is still a usable run,
    /// so only a failure to invoke the tool at all is an error here.
    fn invoke(&self, test: &str) -> TarantulaResult<()> {
        let selector = self.test_selector(test);
        tracing::info!(test, %selector, "invoking mvn clean test");

        let output = Command::new("mvn")
            .arg("clean")
            .arg("test")
            .arg(&selector)
            .current_dir(&self.project_root)
            .output()
            .map_err(|e| {
                TarantulaError::external_tool(test, format!("could not invoke mvn: {e}"))
            })?;

        tracing::debug!(test, status = %output.status, "mvn finished");
        Ok(())
    }
}

impl TestExecutor for MavenRunner {
    fn run_test(&mut self, test: &str) -> TarantulaResult<TestExecution> {
        self.invoke(test)?;

        let counts = surefire::decode_counts(&self.project_root, test)?;
        let executed_lines = jacoco::decode_executed_lines(
            &self.project_root,
            &self.package,
            &self.source_file,
            test,
        )?;

        Ok(TestExecution {
            counts,
            executed_lines,
        })
    }
}
