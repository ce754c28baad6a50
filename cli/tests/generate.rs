//! # Dirctl CLI Generate Command Integration Tests
//!
//! File: cli/tests/generate.rs
//!
//! ## Overview
//!
//! Runs `dirctl generate` on small fixture directories, and feeds the
//! generated notation back into `dirctl build`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn fixture(dir: &Path) {
    write_file(dir, "sub/a.txt", "a");
    write_file(dir, "b.md", "b");
}

fn label(dir: &Path) -> String {
    dir.canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_generate_writes_default_output() {
    let temp = tempdir().unwrap();
    fixture(temp.path());

    dirctl_in(temp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    let document = fs::read_to_string(temp.path().join("directory-structure.txt")).unwrap();
    let expected = format!(
        "# Generated Structure\n# Files: 2 | Dirs: 1\n\n{}/\n├── b.md\n└── sub/\n    └── a.txt\n",
        label(temp.path())
    );
    assert_eq!(document, expected);
}

#[test]
fn test_generate_stdout_writes_no_file() {
    let temp = tempdir().unwrap();
    fixture(temp.path());

    dirctl_in(temp.path())
        .args(["generate", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Generated Structure"))
        .stdout(predicate::str::contains("└── sub/"));

    assert!(!temp.path().join("directory-structure.txt").exists());
}

#[test]
fn test_generate_custom_output_and_root() {
    let temp = tempdir().unwrap();
    let project = temp.path().join("project");
    fixture(&project);

    dirctl_in(temp.path())
        .args(["generate", "--root", "project", "--output", "layout.txt"])
        .assert()
        .success();

    let document = fs::read_to_string(project.join("layout.txt")).unwrap();
    assert!(document.contains("\nproject/\n"));
    assert!(document.contains("# Files: 2 | Dirs: 1"));
}

#[test]
fn test_generate_skips_configured_excludes() {
    let temp = tempdir().unwrap();
    fixture(temp.path());
    write_file(temp.path(), "target/debug/app", "bin");
    write_file(temp.path(), "node_modules/pkg/index.js", "js");
    write_file(temp.path(), ".dirctl.toml", "[generate]\nexcludes = [\"target\"]\n");

    let output = dirctl_in(temp.path())
        .args(["generate", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let document = String::from_utf8(output).unwrap();

    assert!(!document.contains("target"));
    assert!(!document.contains("node_modules"));
    assert!(!document.contains(".dirctl.toml"));
    assert!(document.contains("b.md"));
}

#[test]
fn test_generate_missing_root_fails() {
    let temp = tempdir().unwrap();

    dirctl_in(temp.path())
        .args(["generate", "--root", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_generated_notation_builds_same_layout() {
    let source = tempdir().unwrap();
    fixture(source.path());

    let output = dirctl_in(source.path())
        .args(["generate", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let target = tempdir().unwrap();
    fs::write(target.path().join("tree.txt"), output).unwrap();

    dirctl_in(target.path())
        .args(["build", "tree.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 Failed"));

    let rebuilt = target.path().join(label(source.path()));
    assert_eq!(list_tree(&rebuilt), vec!["b.md", "sub/", "sub/a.txt"]);
}
