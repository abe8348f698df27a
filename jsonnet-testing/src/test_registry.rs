//! Registration of discovered cases with `libtest-mimic`
//!
//! Each case becomes one trial. Names are `::`-joined paths so the usual
//! test filters (`cargo test -- strings::`) select whole files or suites.

use libtest_mimic::{Failed, Trial};
use serde_json::{json, Value};

use crate::error::HarnessError;
use crate::test_case::{describe_failure, TestCase, TestSuite};
use crate::test_runner::{FileRun, RunOutcome};

/// Suite name for cases from the Python comparison script
pub const COMPARISON_SUITE: &str = "python regex comparison";

/// Suite name for nested suites that have no name of their own
const UNNAMED_SUITE: &str = "suite";

/// A case with its registration path
#[derive(Debug, Clone)]
pub struct RegisteredCase {
    pub path: Vec<String>,
    pub case: TestCase,
}

impl RegisteredCase {
    pub fn full_name(&self) -> String {
        self.path.join("::")
    }
}

/// Everything a run produced, as named cases
pub fn registered_cases(outcome: &RunOutcome) -> Vec<RegisteredCase> {
    let mut registered = Vec::new();

    for run in &outcome.files {
        registered.extend(file_cases(run));
    }

    for case in &outcome.comparison {
        registered.push(RegisteredCase {
            path: vec![COMPARISON_SUITE.to_string(), case.name.clone()],
            case: case.clone(),
        });
    }

    registered
}

/// Build one trial per case
pub fn trials(outcome: &RunOutcome) -> Vec<Trial> {
    registered_cases(outcome)
        .into_iter()
        .map(|registered| {
            let name = registered.full_name();
            let case = registered.case;
            Trial::test(name, move || {
                if case.pass {
                    Ok(())
                } else {
                    Err(Failed::from(describe_failure(&case)))
                }
            })
        })
        .collect()
}

/// Flat list of cases under their own names, the way a results file
/// would list them. Files that failed to load appear as `<suite>::load`.
pub fn flatten(outcome: &RunOutcome) -> Vec<TestCase> {
    let mut cases = Vec::new();
    for run in &outcome.files {
        match &run.result {
            Ok(suites) => cases.extend(suites.iter().flat_map(|s| s.cases.iter().cloned())),
            Err(e) => {
                let mut failure = load_failure(e);
                failure.name = format!("{}::{}", run.suite_name(), failure.name);
                cases.push(failure);
            }
        }
    }
    cases.extend(outcome.comparison.iter().cloned());
    cases
}

fn load_failure(error: &HarnessError) -> TestCase {
    TestCase::new("load", false).with_values(json!({ "err": error.to_string() }), Value::Null)
}

fn file_cases(run: &FileRun) -> Vec<RegisteredCase> {
    let file_suite = run.suite_name().to_string();

    let suites = match &run.result {
        Ok(suites) => suites,
        Err(e) => {
            let failure = load_failure(e);
            return vec![RegisteredCase {
                path: vec![file_suite, failure.name.clone()],
                case: failure,
            }];
        }
    };

    // A single unnamed suite is registered flat under the file
    if let [only] = suites.as_slice() {
        if only.name.is_empty() {
            return only
                .cases
                .iter()
                .map(|case| RegisteredCase {
                    path: vec![file_suite.clone(), case.name.clone()],
                    case: case.clone(),
                })
                .collect();
        }
    }

    suites
        .iter()
        .flat_map(|suite| nested_cases(&file_suite, suite))
        .collect()
}

fn nested_cases(file_suite: &str, suite: &TestSuite) -> Vec<RegisteredCase> {
    let suite_name = match suite.name.trim() {
        "" => UNNAMED_SUITE,
        name => name,
    };
    suite
        .cases
        .iter()
        .map(|case| RegisteredCase {
            path: vec![
                file_suite.to_string(),
                suite_name.to_string(),
                case.name.clone(),
            ],
            case: case.clone(),
        })
        .collect()
}
