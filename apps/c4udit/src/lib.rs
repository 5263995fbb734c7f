//! c4udit core library.
//!
//! This crate exposes programmatic APIs for scanning source files against a
//! regex issue catalog and rendering the results as a markdown report.
//!
//! High-level modules:
//! - `app`: Target selection and mode dispatch for the binary.
//! - `catalog`: Issue catalog loading, composition, and pattern compilation.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `error`: Read/write/catalog/serialization error types.
//! - `models`: Issue, finding, and report data models.
//! - `output`: Human/JSON printers for stdout mode.
//! - `render`: Markdown report rendering.
//! - `scan`: File scanning and finding collection.
//! - `slug`: Markdown anchor slugs.
//! - `toc`: Table-of-contents post-processing of rendered reports.
//! - `utils`: Console helpers.
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod render;
pub mod scan;
pub mod slug;
pub mod toc;
pub mod utils;
