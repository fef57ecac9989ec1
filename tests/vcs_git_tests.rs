//! Live-repository tests for the git backend.
//!
//! These exercise `modified_files` and `modified_lines` against a real
//! `git` binary in a throwaway repository. They skip themselves when git is
//! not installed.

mod common;

use common::{git_available, TestRepo};
use difflint::vcs::{GitBackend, LineSet, Vcs};

#[test]
fn test_working_tree_modified_files_and_lines() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let repo = TestRepo::git_init();
    let file = repo.add_file("a.py", "one\ntwo\nthree\nfour\nfive\n");
    repo.commit_all("initial");

    // Change line 2 and append line 6.
    repo.add_file("a.py", "one\ntwo changed\nthree\nfour\nfive\nsix\n");

    let backend = GitBackend;
    let changed = backend.modified_files(repo.path(), false, None).unwrap();
    assert_eq!(changed.get(&file).map(String::as_str), Some(" M"));

    let lines = backend
        .modified_lines(&file, changed.get(&file).map(String::as_str), None)
        .unwrap();
    assert_eq!(lines, LineSet::Explicit(vec![2, 6]));
}

#[test]
fn test_untracked_file_lints_all_lines() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let repo = TestRepo::git_init();
    repo.add_file("a.py", "one\n");
    repo.commit_all("initial");
    let untracked = repo.add_file("notes.py", "x = 1\n");

    let backend = GitBackend;
    let changed = backend.modified_files(repo.path(), false, None).unwrap();
    assert_eq!(changed.get(&untracked).map(String::as_str), Some("??"));

    let lines = backend
        .modified_lines(&untracked, Some("??"), None)
        .unwrap();
    assert_eq!(lines, LineSet::All);

    // tracked_only hides the untracked entry.
    let tracked = backend.modified_files(repo.path(), true, None).unwrap();
    assert!(!tracked.contains_key(&untracked));
}

#[test]
fn test_staged_modification_reported() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let repo = TestRepo::git_init();
    let file = repo.add_file("a.py", "one\ntwo\n");
    repo.commit_all("initial");

    repo.add_file("a.py", "one\ntwo changed\n");
    repo.git(&["add", "a.py"]);

    let backend = GitBackend;
    let changed = backend.modified_files(repo.path(), false, None).unwrap();
    assert_eq!(changed.get(&file).map(String::as_str), Some("M "));

    let lines = backend
        .modified_lines(&file, Some("M "), None)
        .unwrap();
    assert_eq!(lines, LineSet::Explicit(vec![2]));
}

#[test]
fn test_commit_scoped_discovery() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let repo = TestRepo::git_init();
    let existing = repo.add_file("a.py", "one\ntwo\nthree\n");
    repo.commit_all("initial");

    repo.add_file("a.py", "one\ntwo changed\nthree\n");
    let added = repo.add_file("b.py", "new file\n");
    repo.commit_all("second");
    let sha = repo.head();

    let backend = GitBackend;
    let changed = backend
        .modified_files(repo.path(), false, Some(&sha))
        .unwrap();
    assert_eq!(changed.get(&existing).map(String::as_str), Some("M "));
    assert_eq!(changed.get(&added).map(String::as_str), Some("A "));

    // Lines attributed to that commit via blame.
    let lines = backend
        .modified_lines(&existing, Some("M "), Some(&sha))
        .unwrap();
    assert_eq!(lines, LineSet::Explicit(vec![2]));

    // The added file has no prior content to diff against.
    let lines = backend
        .modified_lines(&added, Some("A "), Some(&sha))
        .unwrap();
    assert_eq!(lines, LineSet::All);
}

#[test]
fn test_filename_with_spaces_survives_discovery() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let repo = TestRepo::git_init();
    repo.add_file("a.py", "one\n");
    repo.commit_all("initial");
    let spaced = repo.add_file("release notes.py", "x = 1\n");

    let backend = GitBackend;
    let changed = backend.modified_files(repo.path(), false, None).unwrap();
    assert_eq!(changed.get(&spaced).map(String::as_str), Some("??"));
}
