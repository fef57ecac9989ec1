//! Error types and exit codes for difflint

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for difflint operations
#[derive(Error, Debug)]
pub enum DiffLintError {
    #[error("fatal: not a git repository")]
    NotARepository,

    #[error("{message}")]
    InvalidFileArgument { message: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("VCS error: {message}")]
    Vcs { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiffLintError {
    /// Convert error to the process exit code:
    /// - 2: invalid file arguments
    /// - 128: not inside a supported repository
    /// - 1: everything else that aborts the run
    ///
    /// Lint outcomes (findings present, linter not spawnable) are not
    /// errors; their statuses are computed in `report::exit_status`.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotARepository => ExitCode::from(128),
            Self::InvalidFileArgument { .. } => ExitCode::from(2),
            Self::Config { .. } => ExitCode::from(1),
            Self::Vcs { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
            Self::Json(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for difflint operations
pub type Result<T> = std::result::Result<T, DiffLintError>;
