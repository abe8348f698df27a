//! Configuration management

use anyhow::{Context, Result};
use jsonnet_testing::TestRunnerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "jsonnet-harness.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// External process configuration
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Output configuration
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Jsonnet interpreter binary
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Extra interpreter arguments, e.g. `["-J", "lib"]`
    #[serde(default)]
    pub interpreter_args: Vec<String>,

    /// Directory holding `*_test.jsonnet` files
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,

    /// Python executable
    #[serde(default = "default_python")]
    pub python: String,

    /// Regex comparison script
    #[serde(default = "default_comparison_script")]
    pub comparison_script: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Results file read by `print` when no files are given
    #[serde(default = "default_results")]
    pub results: PathBuf,

    /// Allow colored output on terminals
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            interpreter_args: Vec::new(),
            test_dir: default_test_dir(),
            python: default_python(),
            comparison_script: default_comparison_script(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results: default_results(),
            color: default_true(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_owned(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: HarnessConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Runner configuration for the library
    pub fn runner_config(&self) -> TestRunnerConfig {
        TestRunnerConfig {
            interpreter: self.runner.interpreter.clone(),
            interpreter_args: self.runner.interpreter_args.clone(),
            test_dir: self.runner.test_dir.clone(),
            python: self.runner.python.clone(),
            comparison_script: self.runner.comparison_script.clone(),
            working_dir: None,
            filter: None,
        }
    }
}

// Default value functions
fn default_interpreter() -> String {
    "jsonnet".to_string()
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("test")
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_comparison_script() -> PathBuf {
    PathBuf::from("scripts/verify_regex_with_python.py")
}

fn default_results() -> PathBuf {
    PathBuf::from("tests").join("results.json")
}

fn default_true() -> bool {
    true
}
