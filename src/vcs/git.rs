//! Git backend
//!
//! File discovery goes through `git status --porcelain` (or `git diff-tree`
//! when scoped to a commit). Line discovery uses the blame trick: lines not
//! yet committed are attributed to the all-zero revision in
//! `git blame --porcelain` output, so filtering blame records by revision
//! yields exactly the uncommitted line numbers - and filtering by a real
//! revision yields the lines introduced by that commit.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::{vcs_command, vcs_command_optional, LineSet, ModifiedFileSet, Vcs};
use crate::error::Result;
use crate::linefilter::capture_groups;

/// Revision git blame attributes not-yet-committed lines to.
const ZERO_REVISION: &str = "0000000000000000000000000000000000000000";

pub struct GitBackend;

impl Vcs for GitBackend {
    fn name(&self) -> &'static str {
        "git"
    }

    fn root(&self) -> Option<PathBuf> {
        vcs_command_optional("git", &["rev-parse", "--show-toplevel"], None)
            .map(|out| PathBuf::from(out.trim()))
    }

    fn last_commit(&self) -> Option<String> {
        vcs_command_optional("git", &["rev-parse", "HEAD"], None)
            .map(|out| out.trim().to_string())
            .filter(|sha| !sha.is_empty())
    }

    fn modified_files(
        &self,
        root: &Path,
        tracked_only: bool,
        commit: Option<&str>,
    ) -> Result<ModifiedFileSet> {
        assert!(
            root.is_absolute(),
            "root has to be absolute, got: {}",
            root.display()
        );

        if let Some(commit) = commit {
            let output = vcs_command(
                "git",
                &[
                    "diff-tree",
                    "-r",
                    "--root",
                    "--no-commit-id",
                    "--name-status",
                    commit,
                ],
                Some(root),
            )?;
            return Ok(output
                .map(|out| parse_diff_tree_output(&out, root))
                .unwrap_or_default());
        }

        let output = vcs_command(
            "git",
            &[
                "status",
                "--porcelain",
                "--untracked-files=all",
                "--ignore-submodules=all",
            ],
            Some(root),
        )?;
        Ok(output
            .map(|out| parse_status_output(&out, root, tracked_only))
            .unwrap_or_default())
    }

    fn modified_lines(
        &self,
        path: &Path,
        mode: Option<&str>,
        commit: Option<&str>,
    ) -> Result<LineSet> {
        match mode {
            None => Ok(LineSet::Explicit(Vec::new())),
            // Staged, unstaged, or both: one blame call covers the union.
            Some("M " | " M" | "MM") => {
                let output = vcs_command(
                    "git",
                    &["blame", "--porcelain", &path.to_string_lossy()],
                    path.parent(),
                )?;
                let Some(output) = output else {
                    tracing::warn!(path = %path.display(), "git blame failed; assuming no lines");
                    return Ok(LineSet::Explicit(Vec::new()));
                };
                let revision = commit.unwrap_or(ZERO_REVISION);
                Ok(LineSet::Explicit(parse_blame_output(&output, revision)))
            }
            // Added, untracked, or added-and-modified: no prior content
            // under version control, nothing to diff against.
            Some(_) => Ok(LineSet::All),
        }
    }
}

/// Parse `git status --porcelain` records into absolute-path keyed tags.
fn parse_status_output(output: &str, root: &Path, tracked_only: bool) -> ModifiedFileSet {
    let mut modes = vec!["M ", " M", "MM", "A ", "AM", "UU"];
    if !tracked_only {
        modes.push(r"\?\?");
    }
    let pattern = Regex::new(&format!(
        r"(?P<mode>{}) (?P<filename>.+)",
        modes.join("|")
    ))
    .expect("status pattern is valid");

    capture_groups(output.lines(), &pattern, &["mode", "filename"])
        .filter_map(|row| match (&row[0], &row[1]) {
            (Some(mode), Some(filename)) => Some((root.join(filename), mode.clone())),
            _ => None,
        })
        .collect()
}

/// Parse `git diff-tree --name-status` records, keeping added and modified
/// entries only. Tags are normalized to the two-character porcelain form.
fn parse_diff_tree_output(output: &str, root: &Path) -> ModifiedFileSet {
    let pattern = Regex::new(r"(?P<mode>[AM])\t(?P<filename>.+)").expect("diff-tree pattern is valid");

    capture_groups(output.lines(), &pattern, &["mode", "filename"])
        .filter_map(|row| match (&row[0], &row[1]) {
            (Some(mode), Some(filename)) => Some((root.join(filename), format!("{} ", mode))),
            _ => None,
        })
        .collect()
}

/// Collect the line numbers that `git blame --porcelain` attributes to
/// `revision`. Blame headers have the form `<rev> <line-in-rev>
/// <final-line> [<group-size>]`; for the zero revision (and for the
/// checked-out commit) the first number is the line in the file under lint.
fn parse_blame_output(output: &str, revision: &str) -> Vec<u32> {
    let pattern = Regex::new(&format!(r"{} (?P<line>\d+) (\d+)", revision))
        .expect("blame pattern is valid");

    capture_groups(output.lines(), &pattern, &["line"])
        .filter_map(|row| row[0].as_ref().and_then(|l| l.parse().ok()))
        .collect()
}
