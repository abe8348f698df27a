//! Test file listing

use crate::config::HarnessConfig;
use anyhow::Result;
use colored::*;
use jsonnet_testing::{Outcome, TestDiscovery};
use std::path::Path;

pub fn list_command(config: &HarnessConfig, dir: Option<&Path>) -> Result<Outcome> {
    let dir = dir.unwrap_or(config.runner.test_dir.as_path());
    let files = TestDiscovery::new().discover(dir)?;

    if files.is_empty() {
        println!("{}", "No test files found".yellow());
        return Ok(Outcome::AllPassed);
    }

    let width = files
        .iter()
        .map(|f| f.suite_name.chars().count())
        .max()
        .unwrap_or(0);
    for file in &files {
        let padding = " ".repeat(width - file.suite_name.chars().count());
        println!("{}{}  {}", file.suite_name.bold(), padding, file.path.display());
    }

    Ok(Outcome::AllPassed)
}
