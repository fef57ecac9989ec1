//! difflint CLI entry point

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;

use difflint::cache::ResultCache;
use difflint::cli::{Cli, OutputFormat};
use difflint::error::{DiffLintError, Result};
use difflint::lint::{lint, FileLintResult};
use difflint::vcs::{self, LineSet, Vcs};
use difflint::{config, report};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "difflint=debug" } else { "difflint=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (backend, root) = vcs::probe().ok_or(DiffLintError::NotARepository)?;

    let commit = if cli.last_commit {
        backend.last_commit()
    } else {
        None
    };
    let changed = backend.modified_files(&root, cli.tracked, commit.as_deref())?;

    // Explicit file arguments restrict the run to those files; a requested
    // file that git/hg does not report as changed still participates, with
    // the empty line set (and therefore no comments) unless --force.
    let targets: BTreeMap<PathBuf, Option<String>> = if cli.files.is_empty() {
        changed.into_iter().map(|(p, mode)| (p, Some(mode))).collect()
    } else {
        validate_file_arguments(&cli.files, &root)?;
        cli.files
            .iter()
            .map(|file| {
                let absolute = absolutize(file);
                let mode = changed.get(&absolute).cloned();
                (absolute, mode)
            })
            .collect()
    };

    let table = config::get_config(Some(&root))?;
    let cache = ResultCache::new(
        cli.cache_dir
            .clone()
            .unwrap_or_else(ResultCache::default_root),
    );

    let backend_ref: &dyn Vcs = backend.as_ref();
    let results: report::RunResults = targets
        .par_iter()
        .map(|(path, mode)| {
            let result = lint_one(
                backend_ref,
                path,
                mode.as_deref(),
                commit.as_deref(),
                cli.force,
                &table,
                &cache,
            );
            (path.clone(), result)
        })
        .collect();

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&results)),
        OutputFormat::Json => println!("{}", report::render_json(&results)?),
    }

    Ok(ExitCode::from(report::exit_status(&results)))
}

/// Dispatch one file. VCS failures while computing the line set are
/// isolated into that file's result; they never abort the run.
fn lint_one(
    backend: &dyn Vcs,
    path: &Path,
    mode: Option<&str>,
    commit: Option<&str>,
    force: bool,
    table: &config::LinterTable,
    cache: &ResultCache,
) -> FileLintResult {
    let lines = if force {
        LineSet::All
    } else {
        match backend.modified_lines(path, mode, commit) {
            Ok(lines) => lines,
            Err(e) => {
                return FileLintResult {
                    errors: vec![format!("could not compute modified lines: {}", e)],
                    ..Default::default()
                }
            }
        }
    };
    lint(path, &lines, table, cache)
}

/// Reject file arguments that do not exist, lie outside the repository, or
/// are directories. All problems are reported at once.
fn validate_file_arguments(files: &[PathBuf], root: &Path) -> Result<()> {
    let mut problems = Vec::new();
    for file in files {
        let absolute = absolutize(file);
        if !absolute.starts_with(root) {
            problems.push(format!(
                "file {} does not belong to repository {}",
                file.display(),
                root.display()
            ));
        }
        if !absolute.exists() {
            problems.push(format!("file {} does not exist", file.display()));
        } else if absolute.is_dir() {
            problems.push(format!(
                "{} is a directory; directories are not supported",
                file.display()
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DiffLintError::InvalidFileArgument {
            message: problems.join("\n"),
        })
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
