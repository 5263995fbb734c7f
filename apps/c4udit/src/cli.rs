//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "c4udit",
    version,
    about = "Regex-based static analyzer for Solidity contracts",
    long_about = "c4udit is a static analyzer for solidity contracts based on regexs.\n\nIt is capable of finding low risk issues and gas optimizations documented in\nthe c4-common-issues repository.\n\nNote that c4udit has a high rate of false positives. Check the results carefully!\n\nConfiguration precedence: CLI > c4udit.toml > defaults.",
    after_help = "Examples:\n  c4udit contracts/Token.sol contracts/Vault.sol\n  c4udit -s contracts/*.sol\n  c4udit -t\n  c4udit --output json contracts/Token.sol"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(short = 's', long = "save", action = clap::ArgAction::SetTrue, conflicts_with = "toc", help = "Save report as file")]
    pub save: bool,
    #[arg(short = 't', long = "toc", action = clap::ArgAction::SetTrue, help = "Save report as file with ToC (rewrites the saved report; scans FILES first when given)")]
    pub toc: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Include table-of-contents blocks in the saved report")]
    pub inline_toc: bool,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Issue catalog file (.toml|.yaml); replaces the built-in catalog unless [catalog].mode = \"extend\"")]
    pub catalog: Option<String>,
    #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(value_name = "FILES", help = "Files to analyze")]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The single action an invocation performs.
pub enum Mode {
    Print,
    Save,
    Toc,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.toc {
            Mode::Toc
        } else if self.save {
            Mode::Save
        } else {
            Mode::Print
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_modes() {
        let cli = Cli::try_parse_from(["c4udit", "a.sol", "b.sol"]).unwrap();
        assert_eq!(cli.mode(), Mode::Print);
        assert_eq!(cli.files, ["a.sol", "b.sol"]);

        let cli = Cli::try_parse_from(["c4udit", "-s", "a.sol"]).unwrap();
        assert_eq!(cli.mode(), Mode::Save);

        let cli = Cli::try_parse_from(["c4udit", "-t"]).unwrap();
        assert_eq!(cli.mode(), Mode::Toc);
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_save_and_toc_conflict() {
        assert!(Cli::try_parse_from(["c4udit", "-s", "-t", "a.sol"]).is_err());
    }

    #[test]
    fn test_options_parse() {
        let cli = Cli::try_parse_from([
            "c4udit",
            "--output",
            "json",
            "--catalog",
            "issues.toml",
            "--inline-toc",
            "-s",
            "a.sol",
        ])
        .unwrap();
        assert_eq!(cli.output.as_deref(), Some("json"));
        assert_eq!(cli.catalog.as_deref(), Some("issues.toml"));
        assert!(cli.inline_toc);
    }
}
