//! Command implementations for the harness CLI

pub mod list;
pub mod print;
pub mod run;

// Re-export command functions
pub use list::list_command;
pub use print::print_command;
pub use run::{run_command, RunOptions};

use crate::OutputFormat;
use anyhow::{Context, Result};
use jsonnet_testing::{ConsoleReporter, JsonReporter, TestReport, TestReporter};
use std::io::{self, Write};

/// Render a report to stdout in the requested format
pub(crate) fn emit(report: &TestReport, format: OutputFormat, color: bool) -> Result<()> {
    let reporter: Box<dyn TestReporter> = match format {
        OutputFormat::Table => Box::new(ConsoleReporter::new(color)),
        OutputFormat::Json => Box::new(JsonReporter::new()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    reporter
        .report(report, &mut out)
        .and_then(|()| out.flush())
        .context("Failed to write report")
}
