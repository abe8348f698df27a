//! Test reporting module
//!
//! This module renders ordered cases as an aligned table or as JSON, and
//! maps the outcome to a process exit code.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::test_case::{summarize_failure, TestCase};

const NAME_HEADER: &str = "Test";
const RESULT_HEADER: &str = "Result";
const DETAILS_HEADER: &str = "Details";
const COLUMN_SEP: &str = " | ";
const RULE_SEP: &str = "-+-";

const PASS_CELL: &str = "✔ Pass";
const FAIL_CELL: &str = "✖ Fail";

type Style = fn(&str) -> ColoredString;

fn bold(s: &str) -> ColoredString {
    s.bold()
}

fn green(s: &str) -> ColoredString {
    s.green()
}

fn red(s: &str) -> ColoredString {
    s.red()
}

fn gray(s: &str) -> ColoredString {
    s.bright_black()
}

/// Summary statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl TestStats {
    pub fn from_cases(cases: &[TestCase]) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.pass).count();
        Self {
            total,
            passed,
            failed: total - passed,
        }
    }
}

/// Process exit status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AllPassed,
    SomeFailed,
    InputError,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::AllPassed => 0,
            Outcome::SomeFailed => 1,
            Outcome::InputError => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Test report
#[derive(Debug)]
pub struct TestReport {
    /// Cases in display order
    pub cases: Vec<TestCase>,

    /// Summary statistics
    pub stats: TestStats,
}

impl TestReport {
    pub fn new(cases: Vec<TestCase>) -> Self {
        let stats = TestStats::from_cases(&cases);
        Self { cases, stats }
    }

    pub fn is_success(&self) -> bool {
        self.stats.failed == 0
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_success() {
            Outcome::AllPassed
        } else {
            Outcome::SomeFailed
        }
    }
}

/// Test reporter trait
pub trait TestReporter {
    /// Write the full report
    fn report(&self, report: &TestReport, out: &mut dyn Write) -> io::Result<()>;
}

/// Whether terminal colors should be used for stdout
pub fn color_enabled(is_terminal: bool, no_color: Option<&str>) -> bool {
    is_terminal && no_color != Some("1")
}

/// Color policy from the live environment
pub fn color_from_env() -> bool {
    let no_color = std::env::var("NO_COLOR").ok();
    color_enabled(io::stdout().is_terminal(), no_color.as_deref())
}

/// Console table reporter
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: String, style: Style) -> String {
        if self.color {
            style(&text).to_string()
        } else {
            text
        }
    }

    fn row(&self, case: &TestCase, name_width: usize, result_width: usize) -> String {
        let cell = if case.pass { PASS_CELL } else { FAIL_CELL };
        let style: Style = if case.pass { green } else { red };
        let details = if case.pass {
            String::new()
        } else {
            self.paint(summarize_failure(case), red)
        };

        format!(
            "{}{}{}{}{}",
            pad(&case.name, name_width),
            COLUMN_SEP,
            self.paint(pad(cell, result_width), style),
            COLUMN_SEP,
            details
        )
    }

    fn summary(&self, stats: &TestStats) -> String {
        let failed = if stats.failed == 0 {
            self.paint("0".to_string(), green)
        } else {
            self.paint(stats.failed.to_string(), red)
        };
        format!(
            "Total: {}  Passed: {}  Failed: {}",
            self.paint(stats.total.to_string(), bold),
            self.paint(stats.passed.to_string(), green),
            failed
        )
    }
}

impl TestReporter for ConsoleReporter {
    fn report(&self, report: &TestReport, out: &mut dyn Write) -> io::Result<()> {
        let widths = ColumnWidths::measure(&report.cases);

        let header = format!(
            "{}{}{}{}{}",
            pad(NAME_HEADER, widths.name),
            COLUMN_SEP,
            pad(RESULT_HEADER, widths.result),
            COLUMN_SEP,
            DETAILS_HEADER
        );
        writeln!(out, "{}", self.paint(header, bold))?;

        let rule = format!(
            "{}{}{}{}{}",
            "-".repeat(widths.name),
            RULE_SEP,
            "-".repeat(widths.result),
            RULE_SEP,
            "-".repeat(DETAILS_HEADER.len())
        );
        writeln!(out, "{}", self.paint(rule, gray))?;

        for case in &report.cases {
            writeln!(out, "{}", self.row(case, widths.name, widths.result))?;
        }

        writeln!(out, "{}", self.summary(&report.stats))
    }
}

/// Column widths in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub name: usize,
    pub result: usize,
}

impl ColumnWidths {
    pub fn measure(cases: &[TestCase]) -> Self {
        let mut widths = Self {
            name: width(NAME_HEADER),
            result: width(RESULT_HEADER),
        };
        for case in cases {
            widths.name = widths.name.max(width(&case.name));
            let cell = if case.pass { PASS_CELL } else { FAIL_CELL };
            widths.result = widths.result.max(width(cell));
        }
        widths
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, len: usize) -> String {
    let current = width(s);
    if current >= len {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(len - current))
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    stats: TestStats,
    success: bool,
    cases: &'a [TestCase],
}

/// JSON test reporter
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_json(&self, report: &TestReport) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonDocument {
            generated_at: chrono::Utc::now(),
            stats: report.stats,
            success: report.is_success(),
            cases: &report.cases,
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TestReporter for JsonReporter {
    fn report(&self, report: &TestReport, out: &mut dyn Write) -> io::Result<()> {
        let json = self.to_json(report).map_err(io::Error::other)?;
        writeln!(out, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(cases: Vec<TestCase>) -> String {
        let report = TestReport::new(cases);
        let mut out = Vec::new();
        ConsoleReporter::new(false).report(&report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_stats() {
        let report = TestReport::new(vec![
            TestCase::new("a", true),
            TestCase::new("b", false),
            TestCase::new("c", true),
        ]);
        assert_eq!(
            report.stats,
            TestStats {
                total: 3,
                passed: 2,
                failed: 1
            }
        );
        assert!(!report.is_success());
        assert_eq!(report.outcome().code(), 1);
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = TestReport::new(Vec::new());
        assert_eq!(report.outcome(), Outcome::AllPassed);
        assert_eq!(render(Vec::new()).lines().last(), Some("Total: 0  Passed: 0  Failed: 0"));
    }

    #[test]
    fn test_plain_table() {
        let output = render(vec![
            TestCase::new("short", true),
            TestCase::new("a longer name", false).with_values(json!(1), json!(2)),
        ]);
        let expected = [
            "Test          | Result | Details",
            "--------------+--------+--------",
            "short         | ✔ Pass | ",
            "a longer name | ✖ Fail | got=1 want=2",
            "Total: 2  Passed: 1  Failed: 1",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_colored_table() {
        colored::control::set_override(true);

        let cases = vec![
            TestCase::new("short", true),
            TestCase::new("a longer name", false).with_values(json!(1), json!(2)),
        ];
        let report = TestReport::new(cases.clone());
        let mut out = Vec::new();
        ConsoleReporter::new(true).report(&report, &mut out).unwrap();
        let colored_output = String::from_utf8(out).unwrap();
        let lines: Vec<_> = colored_output.lines().collect();

        assert!(lines[2].contains(&PASS_CELL.green().to_string()));
        assert!(lines[3].contains(&FAIL_CELL.red().to_string()));
        assert!(lines[3].ends_with(&"got=1 want=2".red().to_string()));
        assert!(lines[0].starts_with("\u{1b}["));

        let all_pass = TestReport::new(vec![TestCase::new("a", true)]);
        let summary = ConsoleReporter::new(true).summary(&all_pass.stats);
        assert!(summary.ends_with(&format!("Failed: {}", "0".green())));

        // Escape codes never count toward column widths
        assert_eq!(strip_ansi(&colored_output), render(cases));
    }

    #[test]
    fn test_column_widths() {
        let widths = ColumnWidths::measure(&[TestCase::new("ü-name", true)]);
        assert_eq!(widths, ColumnWidths { name: 6, result: 6 });

        let widths = ColumnWidths::measure(&[TestCase::new("x", true)]);
        assert_eq!(widths.name, NAME_HEADER.len());
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
        assert_eq!(pad("✔", 2), "✔ ");
    }

    #[test]
    fn test_color_policy() {
        assert!(color_enabled(true, None));
        assert!(color_enabled(true, Some("0")));
        assert!(!color_enabled(true, Some("1")));
        assert!(!color_enabled(false, None));
    }

    #[test]
    fn test_json_reporter() {
        let report = TestReport::new(vec![TestCase::new("a", true), TestCase::new("b", false)]);
        let json: serde_json::Value =
            serde_json::from_str(&JsonReporter::new().to_json(&report).unwrap()).unwrap();
        assert_eq!(json["stats"]["total"], 2);
        assert_eq!(json["stats"]["failed"], 1);
        assert_eq!(json["success"], false);
        assert_eq!(json["cases"][1]["name"], "b");
        assert!(json["generated_at"].is_string());
    }
}
