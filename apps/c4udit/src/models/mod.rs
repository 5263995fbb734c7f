//! Shared data models for scan results and catalog files.

pub mod catalog;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Severity level of a catalog issue.
pub enum Severity {
    #[serde(alias = "gas-optimization")]
    Gas,
    #[serde(alias = "nc")]
    NonCritical,
    #[serde(alias = "low-risk")]
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Gas => "Gas Optimization",
            Severity::NonCritical => "Non-Critical",
            Severity::Low => "Low Risk",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// An issue to search for. `pattern` must be a valid regular expression.
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    #[serde(default)]
    pub impact: String,
    pub pattern: String,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A possible issue found in a scanned file.
pub struct Finding {
    pub issue_id: String,
    pub file: String,
    pub line: usize,
    pub content: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} => {}", self.file, self.line, self.content)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
/// End result of a scan: the issues searched for, the files analyzed, and
/// the findings recorded per issue id.
pub struct Report {
    pub issues: Vec<Issue>,
    pub files_analyzed: Vec<String>,
    findings: BTreeMap<String, Vec<Finding>>,
}

impl Report {
    pub fn new(issues: Vec<Issue>) -> Self {
        Report {
            issues,
            files_analyzed: Vec::new(),
            findings: BTreeMap::new(),
        }
    }

    pub fn add_file(&mut self, file: impl Into<String>) {
        self.files_analyzed.push(file.into());
    }

    /// Append a finding to its issue's list.
    ///
    /// Returns false and drops the finding when its issue id is not part of
    /// this report's issue list.
    pub fn record(&mut self, finding: Finding) -> bool {
        if !self.issues.iter().any(|i| i.id == finding.issue_id) {
            return false;
        }
        self.findings
            .entry(finding.issue_id.clone())
            .or_default()
            .push(finding);
        true
    }

    /// Findings for an issue in discovery order; empty when none.
    pub fn findings(&self, issue_id: &str) -> &[Finding] {
        self.findings
            .get(issue_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Issues that have at least one finding, in catalog order.
    pub fn issues_with_findings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |i| !self.findings(&i.id).is_empty())
    }

    /// Issues of one severity that have at least one finding, in catalog order.
    pub fn issues_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues_with_findings()
            .filter(move |i| i.severity == severity)
    }

    pub fn total_findings(&self) -> usize {
        self.findings.values().map(Vec::len).sum()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues_by_severity(severity)
            .map(|i| self.findings(&i.id).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, severity: Severity) -> Issue {
        Issue {
            id: id.into(),
            severity,
            title: format!("title {id}"),
            impact: String::new(),
            pattern: "x".into(),
            recommendation: String::new(),
        }
    }

    fn finding(id: &str, line: usize) -> Finding {
        Finding {
            issue_id: id.into(),
            file: "a.sol".into(),
            line,
            content: "x".into(),
        }
    }

    #[test]
    fn test_record_rejects_unknown_issue() {
        let mut report = Report::new(vec![issue("G-01", Severity::Gas)]);
        assert!(report.record(finding("G-01", 1)));
        assert!(!report.record(finding("Z-99", 1)));
        assert_eq!(report.total_findings(), 1);
        assert!(report.findings("Z-99").is_empty());
    }

    #[test]
    fn test_issues_with_findings_keep_catalog_order() {
        let mut report = Report::new(vec![
            issue("L-01", Severity::Low),
            issue("L-02", Severity::Low),
            issue("N-01", Severity::NonCritical),
        ]);
        report.record(finding("L-02", 3));
        report.record(finding("N-01", 1));
        report.record(finding("L-01", 9));
        let ids: Vec<_> = report.issues_with_findings().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["L-01", "L-02", "N-01"]);
        let low: Vec<_> = report
            .issues_by_severity(Severity::Low)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(low, ["L-01", "L-02"]);
        assert_eq!(report.count_by_severity(Severity::Low), 2);
        assert_eq!(report.count_by_severity(Severity::Gas), 0);
    }

    #[test]
    fn test_finding_display() {
        let f = Finding {
            issue_id: "G-01".into(),
            file: "src/Token.sol".into(),
            line: 12,
            content: "for (uint i; i < a.length; ++i) {".into(),
        };
        assert_eq!(
            f.to_string(),
            "src/Token.sol::12 => for (uint i; i < a.length; ++i) {"
        );
    }

    #[test]
    fn test_severity_aliases_deserialize() {
        let sev: Severity = serde_json::from_str("\"nc\"").unwrap();
        assert_eq!(sev, Severity::NonCritical);
        let sev: Severity = serde_json::from_str("\"non-critical\"").unwrap();
        assert_eq!(sev, Severity::NonCritical);
        let sev: Severity = serde_json::from_str("\"low-risk\"").unwrap();
        assert_eq!(sev, Severity::Low);
        assert_eq!(Severity::Gas.to_string(), "Gas Optimization");
    }
}
