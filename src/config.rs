//! Layered linter configuration
//!
//! A configuration document is a YAML mapping from linter name to an entry
//! describing how to run it and how to read its output. The bundled default
//! document can be replaced wholesale by a `.difflint.yaml` at the
//! repository root - no merging, the repository file wins entirely.
//!
//! Resolution turns each entry into a `LinterInvocation`: placeholders are
//! substituted, then the command and every extra requirement are looked up
//! on the execution path. Anything unresolved demotes the entry to a
//! `Missing` invocation that reports instead of running.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DiffLintError, Result};
use crate::lint::LinterInvocation;

/// Mapping from file extension (with leading dot) to the ordered list of
/// invocations serving it. An extension may be served by several linters;
/// all run and their results merge.
pub type LinterTable = HashMap<String, Vec<LinterInvocation>>;

/// Bundled default configuration document.
const DEFAULT_CONFIG: &str = include_str!("../configs/config.yaml");

/// Name of the per-repository override file.
pub const REPO_CONFIG_FILENAME: &str = ".difflint.yaml";

/// One named linter entry as written in the configuration document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinterEntry {
    command: String,
    extensions: Vec<String>,
    filter: String,
    installation: String,
    #[serde(default)]
    arguments: Vec<String>,
    #[serde(default)]
    requirements: Vec<String>,
}

/// Directory the `{DEFAULT_CONFIGS}` placeholder resolves to:
/// `DIFFLINT_CONFIGS` override first, then the user data dir.
pub fn default_configs_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DIFFLINT_CONFIGS") {
        return PathBuf::from(dir);
    }

    if let Some(data) = dirs::data_dir() {
        return data.join("difflint").join("configs");
    }

    std::env::temp_dir().join("difflint").join("configs")
}

/// Build the extension table for a run.
///
/// When `repo_root` is given and carries a `.difflint.yaml`, that document
/// replaces the bundled default. Idempotent for unchanged filesystem state.
pub fn get_config(repo_root: Option<&Path>) -> Result<LinterTable> {
    let override_path = repo_root.map(|root| root.join(REPO_CONFIG_FILENAME));
    let document = match override_path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "using repository configuration");
            fs::read_to_string(&path)?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };
    build_table(&document, repo_root)
}

/// Parse a configuration document and resolve every entry.
pub fn build_table(document: &str, repo_root: Option<&Path>) -> Result<LinterTable> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(document).map_err(|e| DiffLintError::Config {
            message: format!("malformed configuration document: {}", e),
        })?;

    // An empty document yields an empty table.
    if value.is_null() {
        return Ok(LinterTable::new());
    }

    let mapping = value.as_mapping().ok_or_else(|| DiffLintError::Config {
        message: "configuration document must be a mapping of linter entries".to_string(),
    })?;

    let configs_dir = default_configs_dir();
    let mut table = LinterTable::new();

    for (key, entry_value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| DiffLintError::Config {
                message: "linter names must be strings".to_string(),
            })?
            .to_string();

        let entry: LinterEntry =
            serde_yaml::from_value(entry_value.clone()).map_err(|e| DiffLintError::Config {
                message: format!("linter \"{}\": {}", name, e),
            })?;

        let (invocation, extensions) = resolve_entry(name, entry, repo_root, &configs_dir);
        for extension in extensions {
            table
                .entry(extension)
                .or_default()
                .push(invocation.clone());
        }
    }

    Ok(table)
}

/// Substitute the recognized placeholders. `{REPO_HOME}` is only replaced
/// when a repository root was supplied; otherwise the token stays put and
/// requirement resolution downgrades the entry gracefully.
fn substitute(text: &str, repo_root: Option<&Path>, configs_dir: &Path) -> String {
    let mut substituted = text.replace("{DEFAULT_CONFIGS}", &configs_dir.to_string_lossy());
    if let Some(root) = repo_root {
        substituted = substituted.replace("{REPO_HOME}", &root.to_string_lossy());
    }
    substituted
}

/// Check the entry's command and extra requirements against the execution
/// path and bind it to a runnable or missing invocation.
fn resolve_entry(
    name: String,
    entry: LinterEntry,
    repo_root: Option<&Path>,
    configs_dir: &Path,
) -> (LinterInvocation, Vec<String>) {
    let command = substitute(&entry.command, repo_root, configs_dir);
    let arguments: Vec<String> = entry
        .arguments
        .iter()
        .map(|arg| substitute(arg, repo_root, configs_dir))
        .collect();
    let requirements: Vec<String> = entry
        .requirements
        .iter()
        .map(|req| substitute(req, repo_root, configs_dir))
        .collect();

    let missing: Vec<String> = std::iter::once(&command)
        .chain(requirements.iter())
        .filter(|candidate| which::which(candidate).is_err())
        .cloned()
        .collect();

    let invocation = if missing.is_empty() {
        let program = which::which(&command).unwrap_or_else(|_| PathBuf::from(&command));
        LinterInvocation::Runnable {
            name,
            program,
            args: arguments,
            filter: entry.filter,
        }
    } else {
        tracing::debug!(
            linter = name.as_str(),
            missing = missing.join(", "),
            "requirements unresolved"
        );
        LinterInvocation::Missing {
            name,
            requirements: missing,
            install_hint: entry.installation,
        }
    };

    (invocation, entry.extensions)
}
