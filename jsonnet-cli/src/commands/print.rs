//! Results printer
//!
//! Reads one or more results documents, pairs Python twin cases with their
//! Jsonnet counterparts, and prints the table.

use crate::config::HarnessConfig;
use crate::OutputFormat;
use anyhow::Result;
use jsonnet_testing::{merge_results, Outcome, TestReport};
use std::path::PathBuf;
use tracing::debug;

pub fn print_command(
    config: &HarnessConfig,
    files: &[PathBuf],
    format: OutputFormat,
    color: bool,
) -> Result<Outcome> {
    let files = if files.is_empty() {
        vec![config.report.results.clone()]
    } else {
        files.to_vec()
    };
    debug!("Reading results from {:?}", files);

    let cases = merge_results(&files)?;
    let report = TestReport::new(cases);
    super::emit(&report, format, color)?;

    Ok(report.outcome())
}
