//! Mercurial backend
//!
//! File discovery goes through `hg status`, optionally scoped with
//! `--change`. Line discovery parses the hunk headers of a zero-context
//! `hg diff`: each `@@ -a,b +start,count @@` header contributes the line
//! range `[start, start+count)`. Mercurial always prints both counts
//! explicitly, so the header pattern requires them.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::{vcs_command, vcs_command_optional, LineSet, ModifiedFileSet, Vcs};
use crate::error::Result;
use crate::linefilter::capture_groups;

pub struct HgBackend;

impl Vcs for HgBackend {
    fn name(&self) -> &'static str {
        "hg"
    }

    fn root(&self) -> Option<PathBuf> {
        vcs_command_optional("hg", &["root"], None).map(|out| PathBuf::from(out.trim()))
    }

    fn last_commit(&self) -> Option<String> {
        vcs_command_optional("hg", &["parent", "--template={node}"], None)
            .map(|out| out.trim().to_string())
            .filter(|node| !node.is_empty())
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

        let mut args = vec!["status".to_string()];
        if let Some(commit) = commit {
            args.push(format!("--change={}", commit));
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = vcs_command("hg", &arg_refs, Some(root))?;
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
            Some("M") => {
                let mut args = vec!["diff".to_string(), "-U".to_string(), "0".to_string()];
                if let Some(commit) = commit {
                    args.push(format!("--change={}", commit));
                }
                args.push(path.to_string_lossy().to_string());
                let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

                let output = vcs_command("hg", &arg_refs, path.parent())?;
                let Some(output) = output else {
                    tracing::warn!(path = %path.display(), "hg diff failed; assuming no lines");
                    return Ok(LineSet::Explicit(Vec::new()));
                };
                Ok(LineSet::Explicit(parse_diff_hunks(&output)))
            }
            // Added or untracked: nothing to diff against.
            Some(_) => Ok(LineSet::All),
        }
    }
}

/// Parse `hg status` records (single-char mode, space, path) into
/// absolute-path keyed tags.
fn parse_status_output(output: &str, root: &Path, tracked_only: bool) -> ModifiedFileSet {
    let mut modes = vec!["M", "A"];
    if !tracked_only {
        modes.push(r"\?");
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

/// Expand zero-context diff hunk headers into the added-side line numbers.
fn parse_diff_hunks(output: &str) -> Vec<u32> {
    let pattern = Regex::new(r"@@ -\d+,\d+ \+(?P<start_line>\d+),(?P<lines>\d+) @@")
        .expect("hunk pattern is valid");

    let mut line_numbers = Vec::new();
    for row in capture_groups(output.lines(), &pattern, &["start_line", "lines"]) {
        let (Some(start), Some(count)) = (&row[0], &row[1]) else {
            continue;
        };
        let (Ok(start), Ok(count)) = (start.parse::<u32>(), count.parse::<u32>()) else {
            continue;
        };
        line_numbers.extend(start..start + count);
    }
    line_numbers
}
