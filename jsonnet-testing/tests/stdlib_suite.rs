//! Jsonnet stdlib suite, registered with libtest-mimic.
//!
//! Every case printed by a `*_test.jsonnet` file becomes its own test, and
//! so does every case from the Python regex comparison. Paths are taken from
//! `JSONNET_BIN`, `JSONNET_TEST_DIR`, `PYTHON` and
//! `JSONNET_COMPARISON_SCRIPT`, relative to the workspace root.

use std::path::Path;

use jsonnet_testing::{trials, TestRunner, TestRunnerConfig};
use libtest_mimic::Arguments;

fn main() {
    let args = Arguments::from_args();

    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")));
    let config = TestRunnerConfig::from_env().rooted_at(root);

    // A checkout without the Jsonnet suite has nothing to register
    if !config.test_dir.is_dir() {
        eprintln!(
            "No Jsonnet test directory at {}; nothing to run",
            config.test_dir.display()
        );
        libtest_mimic::run(&args, Vec::new()).exit();
    }

    let runner = TestRunner::new(config);
    let outcome = match runner.run_all() {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Failed to discover Jsonnet tests: {}", e);
            std::process::exit(2);
        }
    };

    libtest_mimic::run(&args, trials(&outcome)).exit();
}
