//! Stdout rendering of a scan report.
//!
//! Supports `human` (default) and `json` outputs. The JSON form lists only
//! issues with findings and adds a top-level summary.

use crate::error::Result;
use crate::models::{Report, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

/// Print a report in the requested format.
pub fn print_report(report: &Report, output: &str) -> Result<()> {
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&compose_report_json(report))?),
        _ => println!("{}", compose_human(report, use_colors(output))),
    }
    Ok(())
}

/// Plain-text listing: analyzed files, then findings grouped by issue id.
pub fn compose_human(report: &Report, color: bool) -> String {
    let mut files = String::from("Files analyzed:\n");
    for f in &report.files_analyzed {
        files.push_str(&format!("- {}\n", f));
    }
    files.push('\n');

    let mut issues = if color {
        format!("{}\n", "Issues found:".bold())
    } else {
        "Issues found:\n".to_string()
    };
    let last = report.issues.len();
    for (i, issue) in report.issues.iter().enumerate() {
        let findings = report.findings(&issue.id);
        if findings.is_empty() {
            continue;
        }
        let id = if color {
            match issue.severity {
                Severity::Gas => issue.id.green().bold().to_string(),
                Severity::Low => issue.id.red().bold().to_string(),
                Severity::NonCritical => issue.id.yellow().bold().to_string(),
            }
        } else {
            issue.id.clone()
        };
        issues.push_str(&format!(" {}:\n", id));
        for f in findings {
            issues.push_str(&format!("  {}\n", f));
        }
        if i + 1 != last {
            issues.push('\n');
        }
    }

    files + &issues
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    let items: Vec<_> = report
        .issues_with_findings()
        .map(|issue| {
            json!({
                "id": issue.id,
                "severity": issue.severity,
                "title": issue.title,
                "findings": report.findings(&issue.id),
            })
        })
        .collect();
    let summary = json!({
        "files": report.files_analyzed.len(),
        "findings": report.total_findings(),
        "gas": report.count_by_severity(Severity::Gas),
        "low": report.count_by_severity(Severity::Low),
        "non_critical": report.count_by_severity(Severity::NonCritical),
    });
    json!({
        "files_analyzed": report.files_analyzed,
        "issues": items,
        "summary": summary,
    })
}
