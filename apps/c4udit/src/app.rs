//! Mode dispatch for the binary: pick scan targets, then print, save, or
//! post-process a report.

use crate::catalog::Catalog;
use crate::cli::{Cli, Mode};
use crate::config::Effective;
use crate::error::{Error, Result};
use crate::models::Report;
use crate::render::{render_markdown, RenderOptions};
use crate::scan::{self, ScanTarget};
use crate::toc::{self, LegacyTocRewriter};
use crate::{output, utils};
use clap::CommandFactory;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the long help text, as shown when there is nothing to scan.
pub fn write_help(out: &mut impl Write) -> Result<()> {
    Cli::command()
        .write_long_help(out)
        .map_err(|e| Error::Write {
            path: PathBuf::from("<stdout>"),
            source: e,
        })
}

/// Files to scan for this invocation.
///
/// Command-line files always win. Config `include` globs only apply to
/// print and save; `-t` without files converts the existing report.
pub fn select_targets(mode: Mode, files: &[String], eff: &Effective) -> Vec<ScanTarget> {
    if !files.is_empty() {
        return files.iter().map(ScanTarget::new).collect();
    }
    match mode {
        Mode::Toc => Vec::new(),
        Mode::Print | Mode::Save => scan::collect_targets(&eff.root, &eff.include),
    }
}

/// Run one mode against already selected targets.
pub fn run(mode: Mode, eff: &Effective, targets: &[ScanTarget], quiet: bool) -> Result<()> {
    match mode {
        Mode::Print => {
            let report = scan_targets(eff, targets, quiet)?;
            output::print_report(&report, &eff.output)?;
        }
        Mode::Save => {
            let report = scan_targets(eff, targets, quiet)?;
            write_file(&eff.report, &render_markdown(&report, &eff.render), quiet)?;
        }
        Mode::Toc => {
            if !targets.is_empty() {
                // The rewriter expects plain tags, so the saved base report has no inline TOC.
                let report = scan_targets(eff, targets, quiet)?;
                let opts = RenderOptions {
                    toc: false,
                    ..eff.render.clone()
                };
                write_file(&eff.report, &render_markdown(&report, &opts), quiet)?;
            }
            let doc = toc::convert_file(&eff.report, &LegacyTocRewriter)?;
            write_file(&eff.toc_report, &doc, quiet)?;
        }
    }
    Ok(())
}

fn scan_targets(eff: &Effective, targets: &[ScanTarget], quiet: bool) -> Result<Report> {
    let catalog = Catalog::resolve(eff.catalog.as_deref(), eff.catalog_mode, &eff.disabled)?;
    if !quiet {
        eprintln!(
            "{} Scanning {} file(s) against {} issue(s)",
            utils::info_prefix(),
            targets.len(),
            catalog.len()
        );
    }
    scan::run_scan(&catalog, targets)
}

fn write_file(path: &Path, contents: &str, quiet: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, contents).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !quiet {
        eprintln!("{} {}", utils::ok_prefix(), path.to_string_lossy());
    }
    Ok(())
}
