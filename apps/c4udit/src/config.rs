//! Configuration discovery and effective settings resolution.
//!
//! c4udit reads `c4udit.toml|yaml|yml` from the starting directory or the
//! closest ancestor that has one, and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `output`: `human`
//! - `report`: `c4udit-report.md`
//! - `toc_report`: `c4udit-report-toc.md`
//! - `include`: empty (files come from the command line)
//! - `render.inline_toc`: false
//! - `render.code_language`: `solidity`
//! - `render.tools_used`: `manual, c4udit, slither`
//! - `catalog.mode`: `replace` when `catalog.path` is set
//!
//! Overrides precedence: CLI > config file > defaults. Report paths and the
//! catalog path are resolved against the directory holding the config file.

use crate::render::RenderOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["c4udit.toml", "c4udit.yaml", "c4udit.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Rendering section under `[render]`.
pub struct RenderCfg {
    pub inline_toc: Option<bool>,
    pub code_language: Option<String>,
    pub tools_used: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// How a user catalog combines with the built-in one.
pub enum CatalogMode {
    #[default]
    Replace,
    Extend,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Catalog section under `[catalog]`.
pub struct CatalogCfg {
    pub path: Option<String>,
    pub mode: Option<CatalogMode>,
    #[serde(default)]
    pub disable: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `c4udit.toml|yaml`.
pub struct AuditConfig {
    pub output: Option<String>,
    pub report: Option<String>,
    pub toc_report: Option<String>,
    #[serde(default)]
    pub include: Vec<String>,
    pub render: Option<RenderCfg>,
    pub catalog: Option<CatalogCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub report: PathBuf,
    pub toc_report: PathBuf,
    pub include: Vec<String>,
    pub render: RenderOptions,
    pub catalog: Option<PathBuf>,
    pub catalog_mode: CatalogMode,
    pub disabled: Vec<String>,
}

/// Walk upward from `start` to the first directory holding a config file.
pub fn detect_config_root(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|name| cur.join(name).exists()) {
            return Some(cur.to_path_buf());
        }
        cur = cur.parent()?;
    }
}

/// Load `AuditConfig` from `c4udit.toml` or `c4udit.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<AuditConfig> {
    let toml_path = root.join("c4udit.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: AuditConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["c4udit.yaml", "c4udit.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: AuditConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_catalog: Option<&str>,
    cli_inline_toc: Option<bool>,
) -> Effective {
    let start = match cli_repo_root {
        Some(r) => PathBuf::from(r),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let found_root = detect_config_root(&start);
    let root = found_root.clone().unwrap_or_else(|| start.clone());
    let cfg = found_root
        .as_deref()
        .and_then(load_config)
        .unwrap_or_default();
    let config_found = found_root.is_some();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let report = root.join(cfg.report.as_deref().unwrap_or("c4udit-report.md"));
    let toc_report = root.join(cfg.toc_report.as_deref().unwrap_or("c4udit-report-toc.md"));

    let render_cfg = cfg.render.unwrap_or_default();
    let defaults = RenderOptions::default();
    let render = RenderOptions {
        toc: cli_inline_toc.or(render_cfg.inline_toc).unwrap_or(false),
        code_language: render_cfg.code_language.unwrap_or(defaults.code_language),
        tools_used: render_cfg.tools_used.unwrap_or(defaults.tools_used),
    };

    let catalog_cfg = cfg.catalog.unwrap_or_default();
    // A CLI catalog path is taken relative to the working directory.
    let catalog = match cli_catalog {
        Some(p) => Some(PathBuf::from(p)),
        None => catalog_cfg.path.as_deref().map(|p| root.join(p)),
    };

    Effective {
        root,
        config_found,
        output,
        report,
        toc_report,
        include: cfg.include,
        render,
        catalog,
        catalog_mode: catalog_cfg.mode.unwrap_or_default(),
        disabled: catalog_cfg.disable,
    }
}
