//! Configuration layering and resolution tests.

mod common;

use common::TestRepo;
use difflint::config::{get_config, REPO_CONFIG_FILENAME};
use difflint::lint::LinterInvocation;

#[test]
fn test_default_config_used_without_repo_override() {
    let repo = TestRepo::new();
    let table = get_config(Some(repo.path())).unwrap();
    // The bundled defaults cover at least the Python and shell toolchains.
    assert!(table.contains_key(".py"));
    assert!(table.contains_key(".sh"));
}

#[test]
fn test_repo_override_replaces_defaults_wholesale() {
    let repo = TestRepo::new();
    repo.add_file(
        REPO_CONFIG_FILENAME,
        r#"
only:
  command: difflint-no-such-linter
  extensions: ['.zig']
  filter: 'x'
  installation: none
"#,
    );

    let table = get_config(Some(repo.path())).unwrap();
    // No merging: the bundled entries are gone entirely.
    assert!(!table.contains_key(".py"));
    assert_eq!(table.len(), 1);
    match &table[".zig"][0] {
        LinterInvocation::Missing { name, .. } => assert_eq!(name, "only"),
        other => panic!("expected missing invocation, got {:?}", other),
    }
}

#[test]
fn test_empty_repo_override_yields_empty_table() {
    let repo = TestRepo::new();
    repo.add_file(REPO_CONFIG_FILENAME, "");
    let table = get_config(Some(repo.path())).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_get_config_is_idempotent() {
    let repo = TestRepo::new();
    repo.add_file(
        REPO_CONFIG_FILENAME,
        r#"
a:
  command: difflint-no-such-linter
  extensions: ['.py', '.txt']
  filter: '^(?P<line>{lines})$'
  installation: none
b:
  command: difflint-other-missing
  extensions: ['.txt']
  filter: '^(?P<line>{lines})$'
  installation: none
"#,
    );

    let first = get_config(Some(repo.path())).unwrap();
    let second = get_config(Some(repo.path())).unwrap();
    assert_eq!(first, second);

    // Document order is preserved per extension.
    let names: Vec<&str> = first[".txt"].iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_malformed_repo_override_is_an_error() {
    let repo = TestRepo::new();
    repo.add_file(REPO_CONFIG_FILENAME, "not: [valid\n");
    assert!(get_config(Some(repo.path())).is_err());
}
