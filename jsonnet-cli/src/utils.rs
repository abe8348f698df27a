//! Utility functions and helpers for the CLI

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use jsonnet_testing::FileRun;

/// Progress bar over interpreted test files, drawn on stderr
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    pub fn new(file_count: usize) -> Result<Self> {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Ok(Self { bar })
    }

    /// Record one finished file
    pub fn advance(&self, run: &FileRun) {
        let marker = if run.result.is_ok() { "✓".green() } else { "✗".red() };
        self.bar.set_message(format!("{} {}", marker, run.suite_name()));
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Print an error message with consistent styling
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
