//! Version-control backends for change discovery
//!
//! This module answers two questions for the rest of the tool: which files
//! changed, and which lines inside each file changed. It uses subprocess
//! calls to the native `git`/`hg` binaries for maximum compatibility, the
//! same way their own porcelain does.

mod git;
mod hg;

pub use git::GitBackend;
pub use hg::HgBackend;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DiffLintError, Result};

/// The set of lines a file should be linted against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSet {
    /// No filtering - every line is of interest (new or untracked files).
    All,
    /// An explicit set of 1-based line numbers. May be empty, which means
    /// the file changed per VCS status but no line is attributably modified
    /// (a pure rename, say) and nothing should be reported.
    Explicit(Vec<u32>),
}

impl LineSet {
    pub fn is_empty_explicit(&self) -> bool {
        matches!(self, LineSet::Explicit(lines) if lines.is_empty())
    }
}

/// Mapping from absolute file path to the backend's change-mode tag.
pub type ModifiedFileSet = BTreeMap<PathBuf, String>;

/// Capability set shared by the supported version-control backends.
///
/// All four operations treat a non-zero exit of the underlying discovery
/// command as a recoverable "not applicable" signal rather than an error;
/// only a failure to spawn the backend binary at all surfaces as `Err`.
pub trait Vcs: Send + Sync {
    /// Backend name for logs and messages.
    fn name(&self) -> &'static str;

    /// Canonical absolute repository root, or `None` when the working
    /// directory is not inside a repository of this kind.
    fn root(&self) -> Option<PathBuf>;

    /// Full revision identifier of the checked-out changeset, or `None`
    /// when there is no repository or no history.
    fn last_commit(&self) -> Option<String>;

    /// Files changed in the working tree, or in `commit` when given
    /// (added+modified only - deleted files have nothing to lint).
    ///
    /// `root` must be an absolute path; violating that is a caller bug and
    /// panics rather than returning an error.
    fn modified_files(
        &self,
        root: &Path,
        tracked_only: bool,
        commit: Option<&str>,
    ) -> Result<ModifiedFileSet>;

    /// Lines of `path` changed relative to the last commit (or attributed
    /// to `commit` when given). `mode` is the tag this backend reported in
    /// `modified_files`; `None` means the file was not reported as changed
    /// and yields the empty explicit set.
    fn modified_lines(
        &self,
        path: &Path,
        mode: Option<&str>,
        commit: Option<&str>,
    ) -> Result<LineSet>;
}

/// Probe the supported backends in fixed priority order (git, then hg) and
/// return the first one that reports a repository root.
pub fn probe() -> Option<(Box<dyn Vcs>, PathBuf)> {
    let backends: Vec<Box<dyn Vcs>> = vec![Box::new(GitBackend), Box::new(HgBackend)];
    for backend in backends {
        if let Some(root) = backend.root() {
            tracing::debug!(backend = backend.name(), root = %root.display(), "backend probe hit");
            return Some((backend, root));
        }
    }
    None
}

/// Run a VCS command and return stdout, treating a non-zero exit as the
/// recoverable `Ok(None)` signal. Spawning failures (binary missing, no
/// permissions) surface as `Err`.
pub(crate) fn vcs_command(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<Option<String>> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| DiffLintError::Vcs {
        message: format!("failed to execute {}: {}", program, e),
    })?;

    if !output.status.success() {
        tracing::debug!(
            program,
            args = args.join(" "),
            status = ?output.status.code(),
            "command exited non-zero"
        );
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).to_string()))
}

/// Run a VCS command where any failure (spawn or exit status) collapses to
/// `None`. Used for probing commands like root discovery, where a missing
/// binary and a missing repository are the same answer.
pub(crate) fn vcs_command_optional(program: &str, args: &[&str], cwd: Option<&Path>) -> Option<String> {
    vcs_command(program, args, cwd).ok().flatten()
}
