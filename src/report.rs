//! Report rendering and exit status synthesis
//!
//! The per-file results are presented in sorted path order regardless of
//! the order the parallel dispatch completed in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use console::style;

use crate::error::Result;
use crate::lint::{Comment, FileLintResult};

/// All results of one run, keyed by absolute path. `BTreeMap` gives the
/// sorted-path report ordering for free.
pub type RunResults = BTreeMap<PathBuf, FileLintResult>;

/// Exit status meaning "at least one file had findings".
pub const STATUS_FINDINGS: u8 = 1;
/// Exit status meaning "a configured linter could not be executed".
pub const STATUS_LINTER_NOT_FOUND: u8 = 4;

/// Synthesize the process exit status: findings beat linter-not-found
/// beats clean.
pub fn exit_status(results: &RunResults) -> u8 {
    if results.values().any(|r| !r.comments.is_empty()) {
        return STATUS_FINDINGS;
    }
    if results.values().any(|r| !r.errors.is_empty()) {
        return STATUS_LINTER_NOT_FOUND;
    }
    0
}

/// Render the human-readable report.
pub fn render_text(results: &RunResults) -> String {
    let mut out = String::new();
    for (path, result) in results {
        out.push_str(&format!(
            "Linting file: {}\n",
            style(display_path(path).display()).bold()
        ));

        if result.is_clean() {
            out.push_str(&format!("{}\n", style("OK").green().bold()));
        } else {
            for skip in &result.skipped {
                out.push_str(&format!("{}: {}\n", style("SKIPPED").yellow().bold(), skip));
            }
            for error in &result.errors {
                out.push_str(&format!("{}: {}\n", style("ERROR").red().bold(), error));
            }
            for comment in &result.comments {
                out.push_str(&format_comment(comment));
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}

/// Render the machine-readable report: a map of file path to its three
/// result lists, in sorted path order.
pub fn render_json(results: &RunResults) -> Result<String> {
    let mut document = serde_json::Map::new();
    for (path, result) in results {
        document.insert(
            path.to_string_lossy().to_string(),
            serde_json::to_value(result)?,
        );
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
        document,
    ))?)
}

/// One formatted line per comment, omitting absent fields:
/// `line 5, col 2: Error: [W32]: missing foo`.
fn format_comment(comment: &Comment) -> String {
    let mut position = Vec::new();
    if let Some(line) = comment.line {
        position.push(format!("line {}", line));
    }
    if let Some(column) = comment.column {
        position.push(format!("col {}", column));
    }

    let mut pieces = Vec::new();
    if !position.is_empty() {
        pieces.push(position.join(", "));
    }
    if let Some(severity) = &comment.severity {
        pieces.push(severity.clone());
    }
    if let Some(message_id) = &comment.message_id {
        pieces.push(format!("[{}]", message_id));
    }

    let head = pieces.join(": ");
    match &comment.message {
        Some(message) if head.is_empty() => message.clone(),
        Some(message) => format!("{}: {}", head, message),
        None => head,
    }
}

/// Prefer a path relative to the working directory for display.
fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}
