//! Test harness for the Jsonnet standard-library suite
//!
//! Discovers `*_test.jsonnet` files, runs them through an external
//! interpreter, normalizes the loosely-shaped JSON they print into named
//! cases, and reports those cases as a table, as JSON, or as
//! `libtest-mimic` trials.

pub mod error;
pub mod test_case;
pub mod test_discovery;
pub mod test_order;
pub mod test_registry;
pub mod test_report;
pub mod test_runner;
pub mod test_shape;

pub use error::{HarnessError, Result};
pub use test_case::{describe_failure, summarize_failure, TestCase, TestSuite};
pub use test_discovery::{suite_name_for, TestDiscovery, TestFile};
pub use test_order::order_cases;
pub use test_registry::{flatten, trials};
pub use test_report::{ConsoleReporter, JsonReporter, Outcome, TestReport, TestReporter, TestStats};
pub use test_runner::{FileRun, RunOutcome, TestRunner, TestRunnerConfig};
pub use test_shape::{cases_from_results, suites_from_value};

use std::path::Path;

/// Read one results document and extract its cases.
pub fn load_results(path: &Path) -> Result<Vec<TestCase>> {
    let raw = std::fs::read_to_string(path).map_err(|source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| HarnessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(cases_from_results(&value))
}

/// Read several results documents, merge their cases and order them.
pub fn merge_results<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<TestCase>> {
    let mut cases = Vec::new();
    for path in paths {
        cases.extend(load_results(path.as_ref())?);
    }
    Ok(order_cases(cases))
}
