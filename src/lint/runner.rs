//! Linter execution and output filtering.
//!
//! `lint` is the per-file entry point: it resolves the applicable
//! invocations by extension, runs each one (consulting the result cache),
//! filters the captured output down to the lines of interest, and merges
//! everything into one `FileLintResult`.

use std::path::Path;
use std::process::Command;

use regex::Regex;

use crate::cache::ResultCache;
use crate::config::LinterTable;
use crate::linefilter::capture_groups;
use crate::lint::types::{title_case, Comment, FileLintResult, LinterInvocation};
use crate::vcs::LineSet;

/// Named groups a filter pattern may define, in comment-field order.
const COMMENT_GROUPS: [&str; 5] = ["line", "column", "severity", "message_id", "message"];

/// Lint one file against the requested lines.
///
/// Linters bound to the file's extension run in sequence; their outputs
/// merge by concatenation and the merged comments are sorted by position
/// (missing line first, then missing column first). A file whose extension
/// has no bound linter yields a single skip and nothing else.
pub fn lint(
    path: &Path,
    lines: &LineSet,
    config: &LinterTable,
    cache: &ResultCache,
) -> FileLintResult {
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let Some(invocations) = config.get(&extension) else {
        return FileLintResult {
            skipped: vec![format!(
                "no linter is defined or enabled for files with extension \"{}\"",
                extension
            )],
            ..Default::default()
        };
    };

    let mut result = FileLintResult::default();
    for invocation in invocations {
        result.merge(run_invocation(invocation, path, lines, cache));
    }
    result
        .comments
        .sort_by_key(|comment| comment.position_key());
    result
}

/// State machine per invocation: a runnable one goes cache-hit-or-execute
/// then parse; a missing one records its skip and never executes.
fn run_invocation(
    invocation: &LinterInvocation,
    path: &Path,
    lines: &LineSet,
    cache: &ResultCache,
) -> FileLintResult {
    match invocation {
        LinterInvocation::Missing {
            requirements,
            install_hint,
            ..
        } => {
            let verb = if requirements.len() == 1 { "is" } else { "are" };
            FileLintResult {
                skipped: vec![format!(
                    "{} {} not installed. {}",
                    requirements.join(", "),
                    verb,
                    install_hint
                )],
                ..Default::default()
            }
        }
        LinterInvocation::Runnable {
            name,
            program,
            args,
            filter,
        } => {
            let output = match cache.get(name, path) {
                Some(cached) => {
                    tracing::debug!(linter = name.as_str(), path = %path.display(), "cache hit");
                    cached
                }
                None => {
                    let mut cmd = Command::new(program);
                    cmd.args(args).arg(path);
                    tracing::debug!(linter = name.as_str(), path = %path.display(), "executing");

                    let captured = match cmd.output() {
                        Ok(output) => {
                            // Linters routinely signal findings through a
                            // non-zero exit; the output is what matters.
                            let mut text =
                                String::from_utf8_lossy(&output.stdout).to_string();
                            text.push_str(&String::from_utf8_lossy(&output.stderr));
                            text
                        }
                        Err(e) => {
                            let command_line = render_command_line(program, args, path);
                            tracing::warn!(linter = name.as_str(), error = %e, "spawn failed");
                            return FileLintResult {
                                errors: vec![format!(
                                    "could not execute \"{}\". Make sure all required programs are installed",
                                    command_line
                                )],
                                ..Default::default()
                            };
                        }
                    };

                    if let Err(e) = cache.put(name, path, &captured) {
                        tracing::warn!(linter = name.as_str(), error = %e, "cache write failed");
                    }
                    captured
                }
            };

            parse_output(name, &output, path, lines, filter)
        }
    }
}

/// Filter raw linter output down to structured comments on the requested
/// lines.
fn parse_output(
    name: &str,
    output: &str,
    path: &Path,
    lines: &LineSet,
    filter: &str,
) -> FileLintResult {
    // A file that changed with zero attributable lines gets no comments,
    // ever - an empty alternation would instead match degenerate strings.
    if lines.is_empty_explicit() {
        return FileLintResult::default();
    }

    let lines_pattern = match lines {
        LineSet::All => r"\d+".to_string(),
        LineSet::Explicit(numbers) => numbers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("|"),
    };
    let pattern_source = filter
        .replace("{lines}", &lines_pattern)
        .replace("{filename}", &regex::escape(&path.to_string_lossy()));

    let pattern = match Regex::new(&pattern_source) {
        Ok(pattern) => pattern,
        Err(e) => {
            return FileLintResult {
                errors: vec![format!("invalid filter pattern for {}: {}", name, e)],
                ..Default::default()
            };
        }
    };

    let comments = capture_groups(output.lines(), &pattern, &COMMENT_GROUPS)
        .filter_map(|row| {
            let comment = Comment {
                line: row[0].as_ref().and_then(|v| v.parse().ok()),
                column: row[1].as_ref().and_then(|v| v.parse().ok()),
                severity: row[2].as_deref().map(title_case),
                message_id: row[3].clone(),
                message: row[4].clone(),
            };
            (!comment.is_empty()).then_some(comment)
        })
        .collect();

    FileLintResult {
        comments,
        ..Default::default()
    }
}

fn render_command_line(program: &Path, args: &[String], path: &Path) -> String {
    let mut parts = vec![program.to_string_lossy().to_string()];
    parts.extend(args.iter().cloned());
    parts.push(path.to_string_lossy().to_string());
    parts.join(" ")
}
