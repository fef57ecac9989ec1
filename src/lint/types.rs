//! Core types for the lint module.
//!
//! - `Comment` - one structured finding extracted from linter output
//! - `FileLintResult` - aggregated findings, errors, and skips for a file
//! - `LinterInvocation` - the resolved, callable form of a configured linter

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One structured finding. Every field is optional, but at least one is
/// always present - the parser drops matches that capture nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Line number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Column number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Severity, normalized to title case (e.g. "Warning")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Tool-specific message id/code (e.g. "E501", "SC2086")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Free-text message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Comment {
    pub fn is_empty(&self) -> bool {
        self.line.is_none()
            && self.column.is_none()
            && self.severity.is_none()
            && self.message_id.is_none()
            && self.message.is_none()
    }

    /// Ordering key: line ascending with missing first, then column
    /// ascending with missing first. `Option`'s ordering (None < Some)
    /// gives the missing-first rule directly.
    pub fn position_key(&self) -> (Option<u32>, Option<u32>) {
        (self.line, self.column)
    }
}

/// Per-file outcome of a lint run. The three lists are independent: a file
/// can simultaneously carry comments, errors from one linter, and skips
/// from another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileLintResult {
    /// Merged, position-sorted findings across all linters.
    pub comments: Vec<Comment>,

    /// Tool-invocation failures (command not spawnable).
    pub errors: Vec<String>,

    /// Reasons a linter did not run (missing dependency, no linter bound).
    pub skipped: Vec<String>,
}

impl FileLintResult {
    /// Fold another result into this one, concatenating each list.
    /// Comment ordering is restored by the dispatch engine after the last
    /// merge.
    pub fn merge(&mut self, other: FileLintResult) {
        self.comments.extend(other.comments);
        self.errors.extend(other.errors);
        self.skipped.extend(other.skipped);
    }

    pub fn is_clean(&self) -> bool {
        self.comments.is_empty() && self.errors.is_empty() && self.skipped.is_empty()
    }
}

/// The resolved, callable form of a configured linter entry.
///
/// Construction happens once per process in the config resolver; execution
/// happens per file in the dispatch engine. A `Missing` invocation never
/// attempts execution - calling it yields a skip describing what is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinterInvocation {
    Runnable {
        /// Identity name, also the cache namespace.
        name: String,
        /// PATH-resolved executable.
        program: PathBuf,
        /// Arguments preceding the target file.
        args: Vec<String>,
        /// Output filter pattern with `{lines}`/`{filename}` placeholders.
        filter: String,
    },
    Missing {
        name: String,
        /// The unresolved requirement names.
        requirements: Vec<String>,
        /// Configured installation instructions.
        install_hint: String,
    },
}

impl LinterInvocation {
    pub fn name(&self) -> &str {
        match self {
            Self::Runnable { name, .. } => name,
            Self::Missing { name, .. } => name,
        }
    }
}

/// Normalize a severity word to title case, per word ("fatal error" ->
/// "Fatal Error", "ERROR" -> "Error").
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}
