//! Table-of-contents post-processing for rendered reports.
//!
//! Works on markdown text only. Bracketed issue tags (`[L-01] Title`) are
//! renumbered into sequential display numbers (`1. Title`), each rename gets
//! a TOC entry, and the `## QA Issues found` / `## Gas Findings` headings are
//! replaced with the generated TOC blocks.
//!
//! Low tags are replaced everywhere they occur; Non-Critical and Gas tags are
//! replaced at their first remaining occurrence only. Existing reports depend
//! on this difference, so it is kept as-is.

use crate::error::{Error, Result};
use crate::render::{GAS_HEADING, QA_MARKER};
use crate::slug::slugify;
use regex::Regex;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// A text-to-text rewrite of a rendered report.
pub trait TocRewriter {
    fn rewrite(&self, document: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replace {
    All,
    First,
}

/// String-replacement rewriter producing c4udit's TOC report layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyTocRewriter;

impl TocRewriter for LegacyTocRewriter {
    fn rewrite(&self, document: &str) -> String {
        let mut toc_qa = String::from("# Table of Contents\nLow\n");

        // Later passes locate their tags in the low-renumbered text.
        let low_pass = renumber(document, document, low_tag(), Replace::All, &mut toc_qa);

        toc_qa.push_str("\nNon-Critical\n");
        let nc_pass = renumber(&low_pass, &low_pass, nc_tag(), Replace::First, &mut toc_qa);
        let with_qa_toc = nc_pass.replace(QA_MARKER, &toc_qa);

        let mut toc_gas = String::from("\n# Table of Contents\nGas\n");
        let gas_pass = renumber(&low_pass, &with_qa_toc, gas_tag(), Replace::First, &mut toc_gas);
        toc_gas.push('\n');
        toc_gas.push_str(GAS_HEADING);
        toc_gas.push('\n');

        gas_pass.replace(GAS_HEADING, &toc_gas)
    }
}

/// Renumber every tag `re` finds in `source`, rewriting `target`.
///
/// Appends one TOC entry per match, duplicates included.
fn renumber(source: &str, target: &str, re: &Regex, mode: Replace, toc: &mut String) -> String {
    let mut out = target.to_string();
    for (i, m) in re.find_iter(source).enumerate() {
        let tagged = m.as_str();
        let renamed = format!("{}.{}", i + 1, title_after_tag(tagged));
        let _ = writeln!(toc, "- [{}](#{})", renamed, slugify(&renamed));
        out = match mode {
            Replace::All => out.replace(tagged, &renamed),
            Replace::First => out.replacen(tagged, &renamed, 1),
        };
    }
    out
}

/// Text between the tag's closing `]` and the next `]` (or end of match).
fn title_after_tag(tagged: &str) -> &str {
    tagged.split(']').nth(1).unwrap_or("")
}

fn low_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[L-[0-9][0-9]\].*").expect("static regex"))
}

fn nc_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[N-[0-9][0-9]\].*").expect("static regex"))
}

fn gas_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[G-[0-9][0-9]\].*").expect("static regex"))
}

/// Read a rendered report and rewrite it with `rewriter`.
pub fn convert_file(path: &Path, rewriter: &dyn TocRewriter) -> Result<String> {
    let document = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(rewriter.rewrite(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::render::{render_markdown, RenderOptions};
    use crate::scan::{run_scan, ScanTarget};
    use tempfile::tempdir;

    fn rewrite(doc: &str) -> String {
        LegacyTocRewriter.rewrite(doc)
    }

    #[test]
    fn test_low_duplicates_all_renumbered() {
        let doc = "## QA Issues found\n### [L-01] Foo\n### [L-02] Bar\n### [L-02] Bar\n";
        let out = rewrite(doc);
        assert!(out.contains("### 1. Foo\n### 2. Bar\n### 2. Bar\n"), "{out}");
        assert!(!out.contains("[L-02]"));
        // The duplicate still claims its own TOC slot
        assert!(out.contains(
            "Low\n- [1. Foo](#1-foo)\n- [2. Bar](#2-bar)\n- [3. Bar](#3-bar)\n"
        ));
    }

    #[test]
    fn test_non_critical_duplicates_renumbered_one_at_a_time() {
        let doc = "## QA Issues found\n### [N-01] Baz\n### [N-01] Baz\n";
        let out = rewrite(doc);
        assert!(out.contains("### 1. Baz\n### 2. Baz\n"), "{out}");
        assert!(out.contains("Non-Critical\n- [1. Baz](#1-baz)\n- [2. Baz](#2-baz)\n"));
    }

    #[test]
    fn test_gas_duplicates_renumbered_one_at_a_time() {
        let doc = "## Gas Findings\n### [G-01] Qux\n### [G-01] Qux\n";
        let out = rewrite(doc);
        assert!(out.contains("### 1. Qux\n### 2. Qux\n"), "{out}");
    }

    #[test]
    fn test_headings_replaced_with_toc_blocks() {
        let doc = "# c4udit Report\n\n## QA Issues found\n\n## Low Findings\n\n### [L-01] Unsafe ERC20 Operation(s)\n\
## Non-Critical Findings\n\n### [N-01] Use of `ecrecover()`\n\
## Gas Findings\n\n### [G-01] Cache Array Length Outside of Loop\n";
        let out = rewrite(doc);
        let expected = "# c4udit Report\n\n\
# Table of Contents\n\
Low\n\
- [1. Unsafe ERC20 Operation(s)](#1-unsafe-erc20-operations)\n\
\n\
Non-Critical\n\
- [1. Use of `ecrecover()`](#1-use-of-ecrecover)\n\
\n\
\n\
## Low Findings\n\n### 1. Unsafe ERC20 Operation(s)\n\
## Non-Critical Findings\n\n### 1. Use of `ecrecover()`\n\
\n\
# Table of Contents\n\
Gas\n\
- [1. Cache Array Length Outside of Loop](#1-cache-array-length-outside-of-loop)\n\
\n\
## Gas Findings\n\
\n\n### 1. Cache Array Length Outside of Loop\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_missing_headings_are_not_errors() {
        let doc = "### [L-01] Foo\n### [G-01] Bar\n";
        let out = rewrite(doc);
        assert_eq!(out, "### 1. Foo\n### 1. Bar\n");
    }

    #[test]
    fn test_document_kept_without_low_tags() {
        let doc = "## QA Issues found\n\n## Non-Critical Findings\n\n### [N-01] Baz\n";
        let out = rewrite(doc);
        assert!(out.contains("## Non-Critical Findings\n\n### 1. Baz\n"), "{out}");
        assert!(out.starts_with("# Table of Contents\nLow\n\nNon-Critical\n- [1. Baz](#1-baz)\n"));
    }

    #[test]
    fn test_convert_file_roundtrip_from_scan() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("Token.sol");
        fs::write(
            &src,
            "pragma solidity ^0.8.0;\ncontract T {\n  // TODO\n  function f(address a) public { token.transfer(a, 1); }\n}\n",
        )
        .unwrap();
        let catalog = Catalog::builtin().unwrap();
        let report = run_scan(
            &catalog,
            &[ScanTarget {
                path: src.clone(),
                display: "Token.sol".into(),
            }],
        )
        .unwrap();
        let md_path = dir.path().join("c4udit-report.md");
        fs::write(&md_path, render_markdown(&report, &RenderOptions::default())).unwrap();

        let out = convert_file(&md_path, &LegacyTocRewriter).unwrap();
        assert!(!out.contains(QA_MARKER));
        assert!(out.contains("# Table of Contents\nLow\n- [1. Unsafe ERC20 Operation(s)](#1-unsafe-erc20-operations)\n"));
        assert!(out.contains("### 1. Unsafe ERC20 Operation(s)\n"));
        assert!(out.contains("\n# Table of Contents\nGas\n"));
        assert!(!out.contains("[L-"));
        assert!(!out.contains("[G-"));
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = tempdir().unwrap();
        let err = convert_file(&dir.path().join("absent.md"), &LegacyTocRewriter).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
