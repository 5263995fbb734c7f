//! Issue catalog: an immutable, ordered list of issues with compiled patterns.
//!
//! The built-in catalog is embedded TOML data. User catalogs use the same
//! schema and may replace or extend it. Every pattern is compiled when the
//! catalog is built, so scanning itself never fails on a bad pattern.

use crate::config::CatalogMode;
use crate::error::{CatalogError, Error, Result};
use crate::models::catalog::CatalogFile;
use crate::models::{Issue, Severity};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.toml");

#[derive(Debug, Clone)]
/// An issue paired with its compiled detection pattern.
pub struct CompiledIssue {
    pub issue: Issue,
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    issues: Vec<CompiledIssue>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and invalid patterns.
    pub fn new(issues: Vec<Issue>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(issues.len());
        for issue in issues {
            if !seen.insert(issue.id.clone()) {
                return Err(CatalogError::DuplicateId { id: issue.id });
            }
            let regex = Regex::new(&issue.pattern).map_err(|e| CatalogError::InvalidRegex {
                id: issue.id.clone(),
                pattern: issue.pattern.clone(),
                source: e,
            })?;
            compiled.push(CompiledIssue { issue, regex });
        }
        Ok(Catalog { issues: compiled })
    }

    /// The catalog shipped with the binary: gas, then low, then non-critical.
    pub fn builtin() -> Result<Self, CatalogError> {
        let file = parse_toml("<builtin>", BUILTIN_CATALOG)?;
        Catalog::new(file.issues)
    }

    /// Load a catalog file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let label = path.to_string_lossy();
        let file = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => parse_toml(&label, &data)?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str::<CatalogFile>(&data).map_err(|e| CatalogError::Parse {
                    path: label.to_string(),
                    message: e.to_string(),
                })?
            }
            _ => {
                return Err(CatalogError::UnsupportedFormat {
                    path: path.to_path_buf(),
                }
                .into())
            }
        };
        Ok(Catalog::new(file.issues)?)
    }

    /// Catalog for a run: the built-in catalog, replaced or extended by the
    /// file at `path`, minus the `disabled` ids.
    pub fn resolve(path: Option<&Path>, mode: CatalogMode, disabled: &[String]) -> Result<Self> {
        let catalog = match path {
            None => Catalog::builtin()?,
            Some(p) => {
                let user = Catalog::load(p)?;
                match mode {
                    CatalogMode::Replace => user,
                    CatalogMode::Extend => Catalog::builtin()?.extend(user)?,
                }
            }
        };
        Ok(catalog.without(disabled))
    }

    /// Append another catalog's issues after this one's.
    pub fn extend(self, other: Catalog) -> Result<Self, CatalogError> {
        let issues = self
            .issues
            .into_iter()
            .chain(other.issues)
            .map(|c| c.issue)
            .collect();
        Catalog::new(issues)
    }

    /// Drop the issues whose ids are listed.
    pub fn without(self, ids: &[String]) -> Self {
        Catalog {
            issues: self
                .issues
                .into_iter()
                .filter(|c| !ids.contains(&c.issue.id))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledIssue> {
        self.issues.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CompiledIssue> {
        self.issues.iter().find(|c| c.issue.id == id)
    }

    /// Plain issue definitions in catalog order.
    pub fn issues(&self) -> Vec<Issue> {
        self.issues.iter().map(|c| c.issue.clone()).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|c| c.issue.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

fn parse_toml(label: &str, data: &str) -> Result<CatalogFile, CatalogError> {
    toml::from_str(data).map_err(|e| CatalogError::Parse {
        path: label.to_string(),
        message: e.to_string(),
    })
}
