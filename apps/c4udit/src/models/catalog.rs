//! Catalog file schema: an ordered `[[issues]]` list in TOML or YAML.

use super::Issue;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
/// Top-level catalog document.
pub struct CatalogFile {
    #[serde(default)]
    pub issues: Vec<Issue>,
}
