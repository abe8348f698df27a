//! Live run of the Jsonnet suite
//!
//! Interprets every discovered test file plus the Python comparison and
//! prints the result the same way `print` does for a results file.

use crate::config::HarnessConfig;
use crate::utils::RunProgress;
use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::*;
use jsonnet_testing::{flatten, order_cases, JsonReporter, Outcome, TestReport, TestRunner};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Options for `run`
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run_command(config: &HarnessConfig, options: RunOptions, color: bool) -> Result<Outcome> {
    let mut runner_config = config.runner_config();
    if let Some(dir) = options.dir {
        runner_config.test_dir = dir;
    }
    runner_config.filter = options.filter;

    let runner = TestRunner::new(runner_config);
    let files = runner.discover()?;
    if files.is_empty() {
        eprintln!("{}", "No test files found".yellow());
    }
    info!("Running {} test files", files.len());

    let progress = RunProgress::new(files.len())?;
    let outcome = runner.run_files_with(files, |run| progress.advance(run))?;
    progress.finish();

    let report = TestReport::new(order_cases(flatten(&outcome)));

    if let Some(path) = &options.output {
        let json = JsonReporter::new()
            .to_json(&report)
            .context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    super::emit(&report, options.format, color)?;

    Ok(report.outcome())
}
