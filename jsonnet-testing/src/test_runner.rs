//! Test runner
//!
//! Runs the external Jsonnet interpreter over each discovered test file and
//! the Python comparison script, one process at a time, and collects their
//! JSON output as suites.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{HarnessError, Result};
use crate::test_case::{TestCase, TestSuite};
use crate::test_discovery::{TestDiscovery, TestFile};
use crate::test_shape::{suites_from_value, to_case};

/// Test runner configuration
#[derive(Debug, Clone)]
pub struct TestRunnerConfig {
    /// Jsonnet interpreter binary
    pub interpreter: String,

    /// Extra arguments passed before the test file path
    pub interpreter_args: Vec<String>,

    /// Directory holding `*_test.jsonnet` files
    pub test_dir: PathBuf,

    /// Python executable for the comparison step
    pub python: String,

    /// Comparison script passed to `python`
    pub comparison_script: PathBuf,

    /// Working directory for spawned processes
    pub working_dir: Option<PathBuf>,

    /// Suite name filter
    pub filter: Option<String>,
}

impl Default for TestRunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: "jsonnet".to_string(),
            interpreter_args: Vec::new(),
            test_dir: PathBuf::from("test"),
            python: "python3".to_string(),
            comparison_script: PathBuf::from("scripts/verify_regex_with_python.py"),
            working_dir: None,
            filter: None,
        }
    }
}

impl TestRunnerConfig {
    /// Defaults overlaid with `JSONNET_BIN`, `JSONNET_TEST_DIR`, `PYTHON`
    /// and `JSONNET_COMPARISON_SCRIPT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(bin) = std::env::var("JSONNET_BIN") {
            config.interpreter = bin;
        }
        if let Ok(dir) = std::env::var("JSONNET_TEST_DIR") {
            config.test_dir = PathBuf::from(dir);
        }
        if let Ok(python) = std::env::var("PYTHON") {
            config.python = python;
        }
        if let Ok(script) = std::env::var("JSONNET_COMPARISON_SCRIPT") {
            config.comparison_script = PathBuf::from(script);
        }
        config
    }

    /// Resolve relative paths against `root`, which also becomes the
    /// working directory for spawned processes.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        if self.test_dir.is_relative() {
            self.test_dir = root.join(&self.test_dir);
        }
        if self.comparison_script.is_relative() {
            self.comparison_script = root.join(&self.comparison_script);
        }
        if self.working_dir.is_none() {
            self.working_dir = Some(root.to_path_buf());
        }
        self
    }
}

/// Outcome of interpreting one test file
#[derive(Debug)]
pub struct FileRun {
    pub file: TestFile,
    pub result: Result<Vec<TestSuite>>,
}

impl FileRun {
    pub fn suite_name(&self) -> &str {
        &self.file.suite_name
    }
}

/// Everything a full run produced
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub files: Vec<FileRun>,
    pub comparison: Vec<TestCase>,
}

/// Test runner
pub struct TestRunner {
    config: TestRunnerConfig,
}

impl TestRunner {
    pub fn new(config: TestRunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TestRunnerConfig {
        &self.config
    }

    /// Discover test files under the configured directory
    pub fn discover(&self) -> Result<Vec<TestFile>> {
        TestDiscovery::new()
            .with_filter(self.config.filter.clone())
            .discover(&self.config.test_dir)
    }

    /// Interpret one test file and normalize its output into suites
    pub fn load_file(&self, path: &Path) -> Result<Vec<TestSuite>> {
        let mut command = Command::new(&self.config.interpreter);
        command.args(&self.config.interpreter_args).arg(path);
        let output = self.execute(&mut command, &self.config.interpreter)?;

        if !output.status.success() {
            return Err(HarnessError::Interpreter {
                program: self.config.interpreter.clone(),
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let value: Value =
            serde_json::from_slice(&output.stdout).map_err(|source| HarnessError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(suites_from_value(&value))
    }

    /// Run the Python comparison script. Any failure yields no cases.
    pub fn run_comparison(&self) -> Vec<TestCase> {
        match self.try_comparison() {
            Ok(cases) => cases,
            Err(e) => {
                warn!("Python comparison skipped: {}", e);
                Vec::new()
            }
        }
    }

    /// Discover and run every test file, then the comparison step
    pub fn run_all(&self) -> Result<RunOutcome> {
        let files = self.discover()?;
        self.run_files(files)
    }

    /// Run the given files in order, calling `on_file` after each one
    pub fn run_files_with<F>(&self, files: Vec<TestFile>, mut on_file: F) -> Result<RunOutcome>
    where
        F: FnMut(&FileRun),
    {
        let mut outcome = RunOutcome::default();
        for file in files {
            debug!("Running {}", file.path.display());
            let result = self.load_file(&file.path);
            let run = FileRun { file, result };
            on_file(&run);
            outcome.files.push(run);
        }
        outcome.comparison = self.run_comparison();
        Ok(outcome)
    }

    pub fn run_files(&self, files: Vec<TestFile>) -> Result<RunOutcome> {
        self.run_files_with(files, |_| {})
    }

    fn try_comparison(&self) -> std::result::Result<Vec<TestCase>, String> {
        let script = &self.config.comparison_script;
        if !script.exists() {
            return Err(format!("script {} not found", script.display()));
        }

        let mut command = Command::new(&self.config.python);
        command.arg(script);
        let output = self
            .execute(&mut command, &self.config.python)
            .map_err(|e| e.to_string())?;
        if !output.status.success() {
            return Err(format!(
                "`{}` exited with {}: {}",
                self.config.python,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let value: Value = serde_json::from_slice(&output.stdout).map_err(|e| e.to_string())?;
        let Some(Value::Array(cases)) = value.get("cases") else {
            debug!("Comparison output has no `cases` array");
            return Ok(Vec::new());
        };
        Ok(cases.iter().filter_map(to_case).collect())
    }

    fn execute(&self, command: &mut Command, program: &str) -> Result<Output> {
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        debug!("Executing {:?}", command);
        command.output().map_err(|source| HarnessError::Spawn {
            program: program.to_string(),
            source,
        })
    }
}
