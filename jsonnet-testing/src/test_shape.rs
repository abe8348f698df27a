//! Output shape normalization
//!
//! Test files in the suite emit results in several ad-hoc shapes:
//! `{cases: [...]}`, `{tests: [...]}`, `{suites: [{name, cases}]}`, a bare
//! array of cases, or an array mixing suites and loose cases. Everything is
//! folded into a list of suites here.

use serde_json::{Map, Value};
use tracing::warn;

use crate::test_case::{TestCase, TestSuite};

/// Normalize any supported output shape into suites.
pub fn suites_from_value(value: &Value) -> Vec<TestSuite> {
    match value {
        Value::Object(obj) => suites_from_object(obj),
        Value::Array(items) => suites_from_array(items),
        _ => vec![TestSuite::default()],
    }
}

/// Flatten a results document into cases, dropping suite boundaries.
pub fn cases_from_results(value: &Value) -> Vec<TestCase> {
    suites_from_value(value)
        .into_iter()
        .flat_map(|suite| suite.cases)
        .collect()
}

fn suites_from_object(obj: &Map<String, Value>) -> Vec<TestSuite> {
    if let Some(Value::Array(suites)) = obj.get("suites") {
        return suites
            .iter()
            .map(|suite| TestSuite::new(name_of(suite), case_list(suite)))
            .collect();
    }

    let cases = case_list_of(obj);
    if cases.is_empty() {
        return vec![TestSuite::default()];
    }
    vec![TestSuite::new(name_in(obj), cases)]
}

fn suites_from_array(items: &[Value]) -> Vec<TestSuite> {
    let mut suites = Vec::new();
    let mut loose = Vec::new();

    for item in items {
        match item {
            Value::Object(obj) if matches!(obj.get("cases"), Some(Value::Array(_))) => {
                suites.push(TestSuite::new(name_in(obj), case_list_of(obj)));
            }
            Value::Object(obj) if obj.contains_key("pass") => {
                if let Some(case) = to_case(item) {
                    loose.push(case);
                }
            }
            _ => {}
        }
    }

    if suites.is_empty() {
        // The whole array is a flat list of cases
        return vec![TestSuite::unnamed(items.iter().filter_map(to_case).collect())];
    }

    if !loose.is_empty() {
        suites.insert(0, TestSuite::unnamed(loose));
    }
    suites
}

fn case_list(value: &Value) -> Vec<TestCase> {
    value.as_object().map(case_list_of).unwrap_or_default()
}

fn case_list_of(obj: &Map<String, Value>) -> Vec<TestCase> {
    let list = match (obj.get("cases"), obj.get("tests")) {
        (Some(Value::Array(cases)), _) => cases,
        (_, Some(Value::Array(tests))) => tests,
        _ => return Vec::new(),
    };
    list.iter().filter_map(to_case).collect()
}

pub(crate) fn to_case(value: &Value) -> Option<TestCase> {
    if !value.is_object() {
        warn!("Skipping non-object test case: {}", value);
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(case) => Some(case),
        Err(e) => {
            warn!("Skipping malformed test case {}: {}", value, e);
            None
        }
    }
}

fn name_of(value: &Value) -> String {
    value.as_object().map(name_in).unwrap_or_default()
}

fn name_in(obj: &Map<String, Value>) -> String {
    obj.get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(suite: &TestSuite) -> Vec<&str> {
        suite.cases.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_object_with_cases() {
        let suites = suites_from_value(&json!({
            "name": "strings",
            "cases": [{"name": "a", "pass": true}, {"name": "b", "pass": false}],
            "total": 2
        }));
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "strings");
        assert_eq!(names(&suites[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_object_with_tests_alias() {
        let suites = suites_from_value(&json!({"tests": [{"name": "t", "pass": true}]}));
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "");
        assert_eq!(names(&suites[0]), vec!["t"]);
    }

    #[test]
    fn test_object_with_suites() {
        let suites = suites_from_value(&json!({
            "suites": [
                {"name": "first", "cases": [{"name": "a", "pass": true}]},
                {"tests": [{"name": "b", "pass": true}]},
                {"name": "empty"}
            ]
        }));
        assert_eq!(suites.len(), 3);
        assert_eq!(suites[0].name, "first");
        assert_eq!(suites[1].name, "");
        assert_eq!(names(&suites[1]), vec!["b"]);
        assert_eq!(suites[2].name, "empty");
        assert!(suites[2].cases.is_empty());
    }

    #[test]
    fn test_unknown_object_is_empty_suite() {
        let suites = suites_from_value(&json!({"blocks": {}}));
        assert_eq!(suites, vec![TestSuite::default()]);

        let suites = suites_from_value(&json!({"cases": []}));
        assert_eq!(suites, vec![TestSuite::default()]);
    }

    #[test]
    fn test_flat_array() {
        let suites = suites_from_value(&json!([
            {"name": "a", "pass": true},
            {"name": "b"},
            42
        ]));
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "");
        // Objects without `pass` still count in a flat list
        assert_eq!(names(&suites[0]), vec!["a", "b"]);
        assert!(!suites[0].cases[1].pass);
    }

    #[test]
    fn test_mixed_array() {
        let suites = suites_from_value(&json!([
            {"name": "s1", "cases": [{"name": "x", "pass": true}]},
            {"name": "loose", "pass": false},
            {"name": "ignored"},
            {"cases": [{"name": "y", "pass": true}]}
        ]));
        assert_eq!(suites.len(), 3);
        assert_eq!(suites[0].name, "");
        assert_eq!(names(&suites[0]), vec!["loose"]);
        assert_eq!(suites[1].name, "s1");
        assert_eq!(suites[2].name, "");
        assert_eq!(names(&suites[2]), vec!["y"]);
    }

    #[test]
    fn test_scalar_is_empty_suite() {
        assert_eq!(suites_from_value(&json!(true)), vec![TestSuite::default()]);
        assert_eq!(suites_from_value(&json!(null)), vec![TestSuite::default()]);
    }

    #[test]
    fn test_cases_from_results_flattens() {
        let cases = cases_from_results(&json!({
            "suites": [
                {"name": "one", "cases": [{"name": "a", "pass": true}]},
                {"name": "two", "cases": [{"name": "b", "pass": false}]}
            ]
        }));
        let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_non_boolean_pass_is_counted() {
        let cases = cases_from_results(&json!({
            "cases": [
                {"name": "a", "pass": 1},
                {"name": "b", "pass": null},
                {"name": "c", "pass": true},
                {"name": "d", "pass": 0}
            ]
        }));
        let passes: Vec<_> = cases.iter().map(|c| (c.name.as_str(), c.pass)).collect();
        assert_eq!(passes, vec![("a", true), ("b", false), ("c", true), ("d", false)]);
    }

    #[test]
    fn test_malformed_case_is_skipped() {
        let cases = cases_from_results(&json!({
            "cases": [{"name": 7, "pass": true}, {"name": "ok", "pass": true}]
        }));
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "ok");
    }
}
