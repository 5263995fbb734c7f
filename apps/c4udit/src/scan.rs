//! Scanner: applies every catalog pattern to every target file.
//!
//! Files are scanned one at a time in the given order. Each issue's pattern
//! is evaluated against the whole file text; every non-overlapping match
//! becomes a `Finding` carrying the 1-based line number and the full line
//! that contains the match start.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::{Finding, Report};
use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file to scan and the name it is reported under.
pub struct ScanTarget {
    pub path: PathBuf,
    pub display: String,
}

impl ScanTarget {
    /// Target reported exactly as it was given.
    pub fn new(path: impl Into<String>) -> Self {
        let display = path.into();
        ScanTarget {
            path: PathBuf::from(&display),
            display,
        }
    }
}

/// Scan `targets` against `catalog`.
///
/// Any unreadable file aborts the run; no partial report is produced.
/// Contents are not validated: invalid UTF-8 is decoded lossily.
pub fn run_scan(catalog: &Catalog, targets: &[ScanTarget]) -> Result<Report> {
    let mut report = Report::new(catalog.issues());
    for target in targets {
        let bytes = fs::read(&target.path).map_err(|e| Error::Read {
            path: target.path.clone(),
            source: e,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        report.add_file(target.display.clone());
        for finding in scan_text(catalog, &target.display, &text) {
            report.record(finding);
        }
    }
    Ok(report)
}

/// Findings for one file's contents, grouped by issue in catalog order and
/// by match position within each issue.
pub fn scan_text(catalog: &Catalog, file: &str, text: &str) -> Vec<Finding> {
    let lines = LineIndex::new(text);
    let mut out = Vec::new();
    for compiled in catalog.iter() {
        for m in compiled.regex.find_iter(text) {
            let line = lines.line_of(m.start());
            out.push(Finding {
                issue_id: compiled.issue.id.clone(),
                file: file.to_string(),
                line,
                content: lines.line_text(text, line).to_string(),
            });
        }
    }
    out
}

/// Expand glob patterns relative to `root` into scan targets.
///
/// Paths are reported relative to `root`; duplicates across patterns are
/// dropped, keeping the first occurrence.
pub fn collect_targets(root: &Path, patterns: &[String]) -> Vec<ScanTarget> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut targets = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = match glob(&pattern) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for path in entries.flatten() {
            if !path.is_file() || !seen.insert(path.clone()) {
                continue;
            }
            let display = pathdiff::diff_paths(&path, root)
                .unwrap_or_else(|| path.clone())
                .to_string_lossy()
                .to_string();
            targets.push(ScanTarget { path, display });
        }
    }
    targets
}

/// Byte offsets of line starts, for mapping match offsets to lines.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    /// 1-based line containing `offset`.
    fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Text of a 1-based line without its terminator.
    fn line_text<'a>(&self, text: &'a str, line: usize) -> &'a str {
        let start = self.starts[line - 1];
        let end = self
            .starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(text.len());
        let s = &text[start..end];
        s.strip_suffix('\r').unwrap_or(s)
    }
}
