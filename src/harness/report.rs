//! Run report and rendering
//!
//! The runner produces a [`RunReport`] value; this module turns it into the
//! human summary (or JSON) and decides the overall clear/problems status.
//! Keeping rendering out of the runner lets the same run be asserted on in
//! tests without capturing console output.

use colored::Colorize;
use serde::Serialize;

use super::runner::Phase;
use crate::common::Result;

/// Max number of reason lines shown per failed step
const MAX_REASON_LINES: usize = 3;

/// Max characters per shown reason line
const MAX_REASON_CHARS: usize = 200;

/// Recorded status of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Passed {
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    Failed {
        reason: String,
    },
    Skipped,
}

impl StepStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// One entry in the ordered run record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub phase: Phase,
    #[serde(flatten)]
    pub status: StepStatus,
}

/// Aggregated, ordered record of all step outcomes for one execution
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub records: Vec<StepRecord>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status.is_skipped())
            .count()
    }

    /// Success percentage over executed (non-skipped) steps; 0.0 when
    /// nothing was executed
    pub fn success_rate(&self) -> f64 {
        let executed = self.passed() + self.failed();
        if executed == 0 {
            0.0
        } else {
            self.passed() as f64 * 100.0 / executed as f64
        }
    }

    /// "All clear" iff no step failed; skipped steps do not block it
    pub fn all_clear(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(|r| r.status.is_failed())
    }
}

/// Print the human-readable report to stdout
pub fn render(report: &RunReport) {
    println!();
    let mut current_phase = None;
    for record in &report.records {
        if current_phase != Some(record.phase) {
            current_phase = Some(record.phase);
            let header = match record.phase {
                Phase::Main => "═══ checks ═══════════════════════════════",
                Phase::Cleanup => "═══ cleanup ══════════════════════════════",
            };
            println!("{}", header.cyan());
        }

        match &record.status {
            StepStatus::Passed { detail } => {
                println!("{} {}", "✓".green(), record.name);
                if let Some(detail) = detail {
                    println!("  └─ {}", detail.dimmed());
                }
            }
            StepStatus::Failed { reason } => {
                println!("{} {}", "✗".red(), record.name);
                for line in reason_lines(reason) {
                    println!("  └─ {line}");
                }
            }
            StepStatus::Skipped => {
                println!("{} {} {}", "−".yellow(), record.name, "(skipped)".dimmed());
            }
        }
    }

    println!();
    println!("{}", "══════════════ summary ═══════════════════".blue().bold());
    println!("{} {}", "✓ passed: ".green(), report.passed());
    println!("{} {}", "✗ failed: ".red(), report.failed());
    println!("{} {}", "− skipped:".yellow(), report.skipped());
    println!("  total:   {}", report.total());
    println!("  success rate: {:.1}%", report.success_rate());
    println!();

    if report.all_clear() {
        println!("{}", "All checks passed".green().bold());
    } else {
        println!("{}", "Problems detected:".red().bold());
        for record in report.failures() {
            println!("  {} {}", "✗".red(), record.name);
            if let StepStatus::Failed { reason } = &record.status {
                for line in reason_lines(reason) {
                    println!("    └─ {line}");
                }
            }
        }
    }
    println!();
}

/// Render the report as pretty JSON for pipeline consumers
pub fn render_json(report: &RunReport) -> Result<String> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        total: usize,
        passed: usize,
        failed: usize,
        skipped: usize,
        success_rate: f64,
        all_clear: bool,
        steps: &'a [StepRecord],
    }

    let out = JsonReport {
        total: report.total(),
        passed: report.passed(),
        failed: report.failed(),
        skipped: report.skipped(),
        success_rate: report.success_rate(),
        all_clear: report.all_clear(),
        steps: &report.records,
    };

    Ok(serde_json::to_string_pretty(&out)?)
}

/// Bound a failure reason for display: split on line boundaries first, keep
/// at most [`MAX_REASON_LINES`] non-blank lines, cap each at
/// [`MAX_REASON_CHARS`] characters
fn reason_lines(reason: &str) -> Vec<String> {
    reason
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(MAX_REASON_LINES)
        .map(cap_line)
        .collect()
}

fn cap_line(line: &str) -> String {
    if line.chars().count() <= MAX_REASON_CHARS {
        line.to_string()
    } else {
        let mut capped: String = line.chars().take(MAX_REASON_CHARS).collect();
        capped.push('…');
        capped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: StepStatus) -> StepRecord {
        StepRecord {
            name: name.to_string(),
            phase: Phase::Main,
            status,
        }
    }

    fn passed() -> StepStatus {
        StepStatus::Passed { detail: None }
    }

    fn failed(reason: &str) -> StepStatus {
        StepStatus::Failed {
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_success_rate_excludes_skipped() {
        let mut records = Vec::new();
        for i in 0..7 {
            records.push(record(&format!("pass {i}"), passed()));
        }
        for i in 0..3 {
            records.push(record(&format!("fail {i}"), failed("boom")));
        }
        for i in 0..2 {
            records.push(record(&format!("skip {i}"), StepStatus::Skipped));
        }

        let report = RunReport { records };
        assert_eq!(report.success_rate(), 70.0);
        assert!(!report.all_clear());
    }

    #[test]
    fn test_success_rate_zero_when_nothing_executed() {
        let report = RunReport {
            records: vec![record("skip", StepStatus::Skipped)],
        };
        assert_eq!(report.success_rate(), 0.0);
        // skipped steps do not block a clear status
        assert!(report.all_clear());
    }

    #[test]
    fn test_reason_lines_split_before_capping() {
        let reason = "first line\n\nsecond line\nthird line\nfourth line";
        let lines = reason_lines(reason);
        assert_eq!(lines, vec!["first line", "second line", "third line"]);
    }

    #[test]
    fn test_long_line_is_capped() {
        let reason = "x".repeat(450);
        let lines = reason_lines(&reason);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].chars().count(), 201); // 200 chars + ellipsis
        assert!(lines[0].ends_with('…'));
    }

    #[test]
    fn test_json_render_contains_counts() {
        let report = RunReport {
            records: vec![record("login", failed("HTTP 401"))],
        };
        let json = render_json(&report).unwrap();
        assert!(json.contains("\"failed\": 1"));
        assert!(json.contains("\"all_clear\": false"));
        assert!(json.contains("HTTP 401"));
    }
}
