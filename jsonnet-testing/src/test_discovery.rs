//! Test discovery module
//!
//! This module finds `*_test.jsonnet` files and derives a readable suite
//! name from each file name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HarnessError, Result};

const TEST_FILE_SUFFIX: &str = "_test.jsonnet";

/// A discovered test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    /// Path to the `.jsonnet` file
    pub path: PathBuf,

    /// Suite name derived from the file name
    pub suite_name: String,
}

/// Test discovery
#[derive(Debug, Clone, Default)]
pub struct TestDiscovery {
    filter: Option<String>,
}

impl TestDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep files whose suite name contains `pattern`
    pub fn with_filter(mut self, pattern: Option<String>) -> Self {
        self.filter = pattern;
        self
    }

    /// Discover test files directly inside `dir`, sorted by path
    pub fn discover(&self, dir: &Path) -> Result<Vec<TestFile>> {
        let entries = fs::read_dir(dir).map_err(|source| HarnessError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| HarnessError::Discovery {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !is_test_file(file_name) {
                continue;
            }

            let suite_name = suite_name_for(file_name);
            if let Some(pattern) = &self.filter {
                if !suite_name.contains(pattern.as_str()) {
                    debug!("Filtered out {}", path.display());
                    continue;
                }
            }
            files.push(TestFile { path, suite_name });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!("Discovered {} test files in {}", files.len(), dir.display());
        Ok(files)
    }
}

fn is_test_file(file_name: &str) -> bool {
    file_name.ends_with(TEST_FILE_SUFFIX)
}

/// Turn a test file name into a spaced, lower-case suite name.
///
/// `stdLib_test.jsonnet` becomes `std lib`. Tokens shaped like `stdEx` are
/// left intact.
pub fn suite_name_for(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".jsonnet").unwrap_or(file_name);
    let stem = stem.strip_suffix("_test").unwrap_or(stem);

    let words: Vec<String> = stem
        .split(|c: char| c == '_' || c == ' ')
        .map(|token| {
            if is_ex_token(token) {
                token.to_string()
            } else {
                split_camel_case(token).to_lowercase()
            }
        })
        .collect();

    words.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Matches `^[a-z0-9]+Ex$`.
fn is_ex_token(token: &str) -> bool {
    match token.strip_suffix("Ex") {
        Some(head) => {
            !head.is_empty()
                && head
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        None => false,
    }
}

/// Insert a space at every lower/digit-to-upper boundary.
fn split_camel_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 4);
    let mut prev: Option<char> = None;
    for c in token.chars() {
        if let Some(p) = prev {
            if (p.is_ascii_lowercase() || p.is_ascii_digit()) && c.is_ascii_uppercase() {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
