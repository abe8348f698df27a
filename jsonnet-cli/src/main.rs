//! Jsonnet stdlib harness CLI
//!
//! Prints test-result documents as an aligned table, or runs the Jsonnet
//! suite directly and prints the same table.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jsonnet_testing::test_report::color_from_env;
use jsonnet_testing::{HarnessError, Outcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod commands;
mod config;
mod utils;

use commands::*;
use config::HarnessConfig;

/// Jsonnet stdlib harness - results table and test runner
#[derive(Parser)]
#[command(name = "jsonnet-harness")]
#[command(about = "Results printer and runner for the Jsonnet stdlib test suite")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one or more results files as a table
    Print {
        /// Results files (defaults to tests/results.json)
        files: Vec<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Run the Jsonnet suite and print its results
    Run {
        /// Directory holding *_test.jsonnet files
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Only run files whose suite name contains this text
        #[arg(long)]
        filter: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Also write a JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List discovered test files
    List {
        /// Directory holding *_test.jsonnet files
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match execute(cli) {
        Ok(outcome) => {
            debug!("Finished with {:?}", outcome);
            outcome.into()
        }
        Err(e) => {
            report_failure(&e);
            Outcome::InputError.into()
        }
    }
}

fn execute(cli: Cli) -> Result<Outcome> {
    let config = HarnessConfig::load(cli.config.as_deref())?;

    // Configure color before anything reaches stdout
    let color = !cli.no_color && config.report.color && color_from_env();
    colored::control::set_override(color);

    match cli.command {
        Commands::Print { files, format } => print_command(&config, &files, format, color),
        Commands::Run {
            dir,
            filter,
            format,
            output,
        } => run_command(
            &config,
            RunOptions {
                dir,
                filter,
                format,
                output,
            },
            color,
        ),
        Commands::List { dir } => list_command(&config, dir.as_deref()),
    }
}

fn report_failure(e: &anyhow::Error) {
    debug!("Command failed: {:?}", e);

    match e.downcast_ref::<HarnessError>() {
        Some(harness_error) if harness_error.is_input_error() => {
            let file = harness_error
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unknown)".to_string());
            eprintln!("Failed to read or parse results file: {}", file);
            eprintln!("{}", harness_error);
        }
        _ => utils::print_error(&format!("{:#}", e)),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
