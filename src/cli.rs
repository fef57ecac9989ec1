//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run linters against only the changed lines of your working tree
#[derive(Parser, Debug)]
#[command(name = "difflint")]
#[command(about = "Run linters against only the changed lines of a git or hg working tree")]
#[command(version)]
pub struct Cli {
    /// Files to lint (defaults to every modified file in the repository)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Lint all lines, not only the modified ones
    #[arg(short, long)]
    pub force: bool,

    /// Exclude untracked files
    #[arg(short, long)]
    pub tracked: bool,

    /// Lint the files changed by the last commit instead of the working tree
    #[arg(long)]
    pub last_commit: bool,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Result cache directory (defaults to the user cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for the final report
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled per-file report for terminals
    Text,
    /// Machine-readable report, one object per file
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::try_parse_from(["difflint"]).unwrap();
        assert!(cli.files.is_empty());
        assert!(!cli.force);
        assert!(!cli.tracked);
        assert!(!cli.last_commit);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_parses_flags_and_files() {
        let cli = Cli::try_parse_from([
            "difflint",
            "--force",
            "--tracked",
            "--last-commit",
            "--format",
            "json",
            "a.py",
            "b.sh",
        ])
        .unwrap();
        assert!(cli.force);
        assert!(cli.tracked);
        assert!(cli.last_commit);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.files.len(), 2);
    }
}
