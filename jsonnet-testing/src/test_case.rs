//! Test case model
//!
//! Cases arrive as loosely-typed JSON from the interpreter or the Python
//! comparison script. Only `name` and `pass` carry meaning here; `got` and
//! `want` are kept verbatim for failure messages.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const PYTHON_PREFIX: &str = "python: ";
const PYTHON_SUFFIX: &str = " (python)";

/// Compact summaries longer than this fall back to a truncated `got`.
const SUMMARY_LIMIT: usize = 120;
const SUMMARY_TRUNCATE: usize = 80;

/// Rendering for a missing `got`/`want`.
const MISSING: &str = "<none>";

/// One named test result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "truthy")]
    pub pass: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub got: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub want: Option<Value>,
}

/// A named group of cases
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSuite {
    pub name: String,
    pub cases: Vec<TestCase>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, pass: bool) -> Self {
        Self {
            name: name.into(),
            pass,
            got: None,
            want: None,
        }
    }

    pub fn with_values(mut self, got: Value, want: Value) -> Self {
        self.got = Some(got);
        self.want = Some(want);
        self
    }

    /// Whether this case was produced by the Python comparison step.
    pub fn is_python(&self) -> bool {
        self.name.ends_with(PYTHON_SUFFIX) || self.name.starts_with(PYTHON_PREFIX)
    }

    /// Name with the Python marker removed, used to pair twin cases.
    pub fn base_name(&self) -> &str {
        let name = self.name.strip_prefix(PYTHON_PREFIX).unwrap_or(&self.name);
        name.strip_suffix(PYTHON_SUFFIX).unwrap_or(name)
    }

    /// Error text reported by the producer in `got.err`, if any.
    fn reported_error(&self) -> Option<String> {
        let err = self.got.as_ref()?.as_object()?.get("err")?;
        if !is_truthy(err) {
            return None;
        }
        Some(match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl TestSuite {
    pub fn new(name: impl Into<String>, cases: Vec<TestCase>) -> Self {
        Self {
            name: name.into(),
            cases,
        }
    }

    pub fn unnamed(cases: Vec<TestCase>) -> Self {
        Self::new(String::new(), cases)
    }
}

/// Short failure text for a table cell.
pub fn summarize_failure(case: &TestCase) -> String {
    if let Some(err) = case.reported_error() {
        return err;
    }

    let got = render_value(case.got.as_ref());
    let want = render_value(case.want.as_ref());
    if !got.is_empty()
        && !want.is_empty()
        && got.chars().count() + want.chars().count() < SUMMARY_LIMIT
    {
        return format!("got={} want={}", got, want);
    }

    let head: String = got.chars().take(SUMMARY_TRUNCATE).collect();
    format!("got={}...", head)
}

/// Full failure text for a failing registered test.
pub fn describe_failure(case: &TestCase) -> String {
    if let Some(err) = case.reported_error() {
        return err;
    }
    format!(
        "got={} want={}",
        render_value(case.got.as_ref()),
        render_value(case.want.as_ref())
    )
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Producers are not strict about `pass`; anything falsy is a failure.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Value::deserialize(deserializer).map(|value| is_truthy(&value))
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
