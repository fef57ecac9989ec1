//! TestRepo builder for integration tests
//!
//! Creates throwaway directory trees, optionally initialized as real git
//! repositories, for exercising change discovery and lint dispatch against
//! the actual binaries.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Whether a usable `git` binary is on the path. Tests that need a live
/// repository skip themselves when it is absent.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Builder for throwaway repository structures.
pub struct TestRepo {
    dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    /// Create a plain (non-VCS) directory tree.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root = dir
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir");
        Self { dir, root }
    }

    /// Create a directory tree with an initialized git repository.
    pub fn git_init() -> Self {
        let repo = Self::new();
        repo.git(&["init", "--quiet"]);
        repo
    }

    /// Absolute, canonicalized root of the test tree.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write a file (creating parent directories) and return its absolute
    /// path.
    pub fn add_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("failed to write file");
        full_path
    }

    /// Run a git command inside the repository, isolated from the user's
    /// global configuration, and require success.
    pub fn git(&self, args: &[&str]) -> Output {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Stage everything and commit with a fixed identity.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&[
            "-c",
            "user.email=difflint@example.com",
            "-c",
            "user.name=difflint",
            "commit",
            "--quiet",
            "--no-verify",
            "-m",
            message,
        ]);
    }

    /// Full revision id of the checked-out commit.
    pub fn head(&self) -> String {
        let output = self.git(&["rev-parse", "HEAD"]);
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
