//! Case ordering
//!
//! The Python comparison step re-checks cases already covered by the Jsonnet
//! suite and names them `"<name> (python)"` or `"python: <name>"`. Each
//! Python row is placed right after its Jsonnet twin so the two read
//! side by side.

use std::collections::HashMap;

use crate::test_case::TestCase;

#[derive(Default)]
struct Group {
    primary: Vec<TestCase>,
    python: Vec<TestCase>,
}

/// Order cases so that Python twins follow their primary case.
///
/// Groups keep first-seen order. Groups with at least one primary case come
/// first; groups made only of Python cases are appended afterwards.
pub fn order_cases(cases: Vec<TestCase>) -> Vec<TestCase> {
    let total = cases.len();
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for case in cases {
        let slot = match index.get(case.base_name()) {
            Some(&slot) => slot,
            None => {
                index.insert(case.base_name().to_string(), groups.len());
                groups.push(Group::default());
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        if case.is_python() {
            group.python.push(case);
        } else {
            group.primary.push(case);
        }
    }

    let (paired, python_only): (Vec<Group>, Vec<Group>) =
        groups.into_iter().partition(|g| !g.primary.is_empty());

    let mut ordered = Vec::with_capacity(total);
    for group in paired {
        ordered.extend(group.primary);
        ordered.extend(group.python);
    }
    for group in python_only {
        ordered.extend(group.python);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases(names: &[&str]) -> Vec<TestCase> {
        names.iter().map(|n| TestCase::new(*n, true)).collect()
    }

    fn order(names: &[&str]) -> Vec<String> {
        order_cases(cases(names)).into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_python_follows_primary() {
        assert_eq!(
            order(&["a (python)", "b", "a", "python: b", "c"]),
            vec!["a", "a (python)", "b", "python: b", "c"]
        );
    }

    #[test]
    fn test_python_only_appended_in_discovery_order() {
        assert_eq!(
            order(&["z (python)", "a", "y (python)", "a (python)"]),
            vec!["a", "a (python)", "z (python)", "y (python)"]
        );
    }

    #[test]
    fn test_first_seen_order_uses_primary_position() {
        // Group "a" is first seen through its python twin, which puts it
        // ahead of "b" even though the primary "a" comes later.
        assert_eq!(
            order(&["a (python)", "b", "a"]),
            vec!["a", "a (python)", "b"]
        );
    }

    #[test]
    fn test_duplicates_stay_stable() {
        let mut input = cases(&["dup", "dup (python)", "dup"]);
        input[0].pass = false;
        let out = order_cases(input);
        assert_eq!(out.len(), 3);
        assert!(!out[0].pass);
        assert!(out[1].pass);
        assert_eq!(out[1].name, "dup");
        assert_eq!(out[2].name, "dup (python)");
    }

    #[test]
    fn test_no_python_cases_is_identity() {
        assert_eq!(order(&["c", "a", "b"]), vec!["c", "a", "b"]);
        assert!(order_cases(Vec::new()).is_empty());
    }
}
