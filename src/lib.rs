//! difflint: lint only the lines you changed
//!
//! This library wraps external lint tools and filters their findings down
//! to the lines actually modified in a git or mercurial working tree, so a
//! change shows its own problems without drowning in pre-existing ones.
//!
//! The pipeline: a VCS backend reports the modified files and, per file,
//! the modified line numbers; the configuration resolver maps file
//! extensions to runnable linter invocations; the dispatch engine runs each
//! applicable linter (through a raw-output cache), parses its text output
//! into structured comments via per-linter patterns, and filters them to
//! the lines of interest.
//!
//! # Example
//!
//! ```ignore
//! use difflint::{config, lint, ResultCache};
//! use difflint::vcs::{self, LineSet};
//!
//! let (backend, root) = vcs::probe().expect("not inside a repository");
//! let table = config::get_config(Some(&root))?;
//! let cache = ResultCache::new(ResultCache::default_root());
//!
//! for (path, mode) in backend.modified_files(&root, false, None)? {
//!     let lines = backend.modified_lines(&path, Some(&mode), None)?;
//!     let result = lint(&path, &lines, &table, &cache);
//!     println!("{}: {} comment(s)", path.display(), result.comments.len());
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod linefilter;
pub mod lint;
pub mod report;
pub mod vcs;

// Re-export commonly used types
pub use cache::ResultCache;
pub use cli::{Cli, OutputFormat};
pub use config::{get_config, LinterTable};
pub use error::{DiffLintError, Result};
pub use lint::{lint, Comment, FileLintResult, LinterInvocation};
pub use vcs::{GitBackend, HgBackend, LineSet, ModifiedFileSet, Vcs};
