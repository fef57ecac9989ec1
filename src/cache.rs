//! Raw linter output cache
//!
//! Linters are the slow part of every run, and most runs see mostly
//! unchanged files. This cache stores the raw captured output of each
//! (linter, file) pair on disk and reuses it while the artifact is newer
//! than the source file. Staleness is entirely mtime-driven - touching a
//! file without changing it forces a miss. There is no eviction; entries
//! live until manually cleared.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// Write-through cache of raw linter output, keyed by linter name and
/// absolute source path. Safe for concurrent use across files: every key
/// maps to its own artifact and writes are whole-file overwrites.
#[derive(Debug, Clone)]
pub struct ResultCache {
    root: PathBuf,
}

impl ResultCache {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the user-scoped default cache root: `DIFFLINT_CACHE_DIR`
    /// override first, then `XDG_CACHE_HOME`, then `~/.cache`, with the
    /// temp directory as a last resort.
    pub fn default_root() -> PathBuf {
        if let Ok(dir) = std::env::var("DIFFLINT_CACHE_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg_cache) = std::env::var("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join("difflint");
        }

        if let Some(home) = dirs::home_dir() {
            return home.join(".cache").join("difflint");
        }

        std::env::temp_dir().join("difflint")
    }

    /// Artifact path: `<root>/<linter>/<absolute path minus leading separator>`.
    fn artifact_path(&self, linter: &str, path: &Path) -> PathBuf {
        let without_root: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        self.root.join(linter).join(without_root)
    }

    /// Return the cached output for `(linter, path)`, or `None` when no
    /// artifact exists or the artifact is not strictly newer than the
    /// source file.
    pub fn get(&self, linter: &str, path: &Path) -> Option<String> {
        let artifact = self.artifact_path(linter, path);

        let artifact_mtime = modified_time(&artifact)?;
        let source_mtime = modified_time(path)?;
        if artifact_mtime <= source_mtime {
            tracing::debug!(linter, path = %path.display(), "stale cache artifact");
            return None;
        }

        fs::read_to_string(&artifact).ok()
    }

    /// Store `content` for `(linter, path)`, overwriting any prior
    /// artifact. Creates intervening directories as needed; an already
    /// existing directory is success, not failure.
    pub fn put(&self, linter: &str, path: &Path, content: &str) -> Result<()> {
        let artifact = self.artifact_path(linter, path);
        if let Some(parent) = artifact.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&artifact, content)?;
        Ok(())
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
