//! c4udit CLI binary entry point.
//! Scans files, then prints the report, saves it, or saves a TOC version.

use c4udit::app;
use c4udit::cli::{Cli, Mode};
use c4udit::config;
use c4udit::utils;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let mode = cli.mode();
    let eff = config::resolve_effective(
        cli.repo_root.as_deref(),
        cli.output.as_deref(),
        cli.catalog.as_deref(),
        if cli.inline_toc { Some(true) } else { None },
    );
    let quiet = eff.output == "json";

    if eff.config_found && config::load_config(&eff.root).is_none() && !quiet {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "c4udit config could not be parsed; using defaults."
        );
    }

    let targets = app::select_targets(mode, &cli.files, &eff);

    // Expect at least one file unless post-processing an existing report.
    if targets.is_empty() && mode != Mode::Toc {
        if cli.files.is_empty() && eff.include.is_empty() {
            if let Err(e) = app::write_help(&mut std::io::stdout()) {
                eprintln!("{} {}", utils::error_prefix(), e);
                std::process::exit(1);
            }
            std::process::exit(0);
        }
        if !quiet {
            eprintln!(
                "{} {}",
                utils::note_prefix(),
                "include patterns matched no files."
            );
        }
    }

    if let Err(e) = app::run(mode, &eff, &targets, quiet) {
        eprintln!("{} {}", utils::error_prefix(), e);
        std::process::exit(1);
    }
}
