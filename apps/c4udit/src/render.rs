//! Markdown report renderer.
//!
//! Layout, in order: title and analyzed files, optional Low/Non-Critical
//! table of contents, the `## QA Issues found` marker, Low findings,
//! Non-Critical findings, optional Gas table of contents, Gas findings, and
//! the tools-used footer. Issues without findings are never rendered.
//!
//! The `## QA Issues found` and `## Gas Findings` headings are anchors for
//! the TOC post-processor in `toc`.

use crate::models::{Issue, Report, Severity};
use crate::slug::issue_link;
use std::fmt::Write as _;

pub const QA_MARKER: &str = "## QA Issues found";
pub const GAS_HEADING: &str = "## Gas Findings";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit table-of-contents blocks.
    pub toc: bool,
    /// Info string on the fenced findings blocks.
    pub code_language: String,
    pub tools_used: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            toc: false,
            code_language: "solidity".to_string(),
            tools_used: "manual, c4udit, slither".to_string(),
        }
    }
}

/// Render `report` as a markdown document.
pub fn render_markdown(report: &Report, opts: &RenderOptions) -> String {
    let mut buf = String::new();

    buf.push_str("# c4udit Report\n\n");
    buf.push_str("## Files analyzed\n");
    for f in &report.files_analyzed {
        let _ = writeln!(buf, "- {f}");
    }

    if opts.toc {
        buf.push_str("# Table of Contents \n");
        push_toc_group(&mut buf, report, Severity::Low, "Low\n");
        push_toc_group(&mut buf, report, Severity::NonCritical, "\nNon-Critical\n");
        buf.push('\n');
    }

    buf.push_str(QA_MARKER);
    buf.push_str("\n\n");

    buf.push_str("## Low Findings\n\n");
    push_issue_sections(&mut buf, report, Severity::Low, opts);

    buf.push_str("## Non-Critical Findings\n\n");
    push_issue_sections(&mut buf, report, Severity::NonCritical, opts);

    if opts.toc {
        buf.push_str("# Table of Contents \n");
        push_toc_group(&mut buf, report, Severity::Gas, "Gas\n");
        buf.push('\n');
    }

    buf.push_str(GAS_HEADING);
    buf.push_str("\n\n");
    push_issue_sections(&mut buf, report, Severity::Gas, opts);

    buf.push_str("#### Tools used\n");
    let _ = writeln!(buf, "{}", opts.tools_used);
    buf.push('\n');

    buf
}

/// TOC entries for one severity; `header` is written once, before the first
/// entry, and omitted when the group is empty.
fn push_toc_group(buf: &mut String, report: &Report, severity: Severity, header: &str) {
    let mut header_written = false;
    for issue in report.issues_by_severity(severity) {
        if !header_written {
            buf.push_str(header);
            header_written = true;
        }
        let _ = writeln!(
            buf,
            "- [[{}] {}]({})",
            issue.id,
            issue.title,
            issue_link(&issue.id, &issue.title)
        );
    }
}

fn push_issue_sections(buf: &mut String, report: &Report, severity: Severity, opts: &RenderOptions) {
    for issue in report.issues_by_severity(severity) {
        push_issue(buf, report, issue, opts);
    }
}

fn push_issue(buf: &mut String, report: &Report, issue: &Issue, opts: &RenderOptions) {
    let _ = writeln!(buf, "### [{}] {}", issue.id, issue.title);

    if !issue.impact.is_empty() {
        buf.push_str("#### Impact\n");
        let _ = writeln!(buf, "{}", issue.impact);
    }

    buf.push_str("#### Findings:\n");
    let _ = writeln!(buf, "```{}", opts.code_language);
    for finding in report.findings(&issue.id) {
        let _ = writeln!(buf, "{finding}");
    }
    buf.push_str("```\n");

    buf.push_str("#### Recommendation\n");
    let _ = writeln!(buf, "{}", issue.recommendation);
    buf.push('\n');
}
