//! # Dirctl CLI Build Command Integration Tests
//!
//! File: cli/tests/build.rs
//!
//! ## Overview
//!
//! Runs `dirctl build` against temporary working roots and checks the
//! resulting filesystem and console report.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const ASCII_TREE: &str = "\
project/
├── src/
│   ├── main.rs
│   └── lib.rs
└── README.md
";

#[test]
fn test_build_scaffolds_ascii_tree() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "tree.txt", ASCII_TREE);

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed Items: 5"))
        .stdout(predicate::str::contains(
            "Summary: 2 Dirs | 3 Files | 0 Moved | 0 Skipped | 0 Failed",
        ))
        .stdout(predicate::str::contains("Operation Complete"));

    assert_eq!(
        list_tree(&temp.path().join("project")),
        vec!["README.md", "src/", "src/lib.rs", "src/main.rs"]
    );
    let content = fs::read_to_string(temp.path().join("project/src/main.rs")).unwrap();
    assert_eq!(content, "# Placeholder for main.rs");
}

#[test]
fn test_build_relocates_loose_file() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "helper.go", "package utils\n");
    write_file(temp.path(), "tree.txt", "utils/\n    helper.go\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[MOVE]"))
        .stdout(predicate::str::contains("from ./helper.go"));

    assert!(!temp.path().join("helper.go").exists());
    let moved = fs::read_to_string(temp.path().join("utils/helper.go")).unwrap();
    assert_eq!(moved, "package utils\n");
}

#[test]
fn test_build_is_idempotent() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "tree.txt", ASCII_TREE);

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success();
    fs::write(temp.path().join("project/README.md"), "edited").unwrap();

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Summary: 0 Dirs | 0 Files | 0 Moved | 3 Skipped | 0 Failed",
        ));

    let readme = fs::read_to_string(temp.path().join("project/README.md")).unwrap();
    assert_eq!(readme, "edited");
}

#[test]
fn test_build_discovers_conventional_file() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "directory-structure.txt", "docs/\n    guide.md\n");

    dirctl_in(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("directory-structure.txt"));

    assert!(temp.path().join("docs/guide.md").is_file());
}

#[test]
fn test_build_sniffs_unconventional_file() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "layout.txt", "app/\n├── a.txt\n└── b.txt\n");

    dirctl_in(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("layout.txt"));

    assert!(temp.path().join("app/a.txt").is_file());
    assert!(temp.path().join("app/b.txt").is_file());
}

#[test]
fn test_build_missing_input_fails() {
    let temp = tempdir().unwrap();

    dirctl_in(temp.path())
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No structure file found"));

    dirctl_in(temp.path())
        .args(["build", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn test_build_comment_only_file_fails() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "tree.txt", "# nothing here\n   \n# still nothing\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid nodes"));
}

#[test]
fn test_build_dry_run_changes_nothing() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "helper.go", "package utils\n");
    write_file(temp.path(), "tree.txt", "utils/\n    helper.go\n    extra.go\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Summary: 1 Dirs | 1 Files | 1 Moved | 0 Skipped | 0 Failed",
        ))
        .stdout(predicate::str::contains("Dry run: nothing was changed"));

    assert!(!temp.path().join("utils").exists());
    assert!(temp.path().join("helper.go").is_file());
}

#[test]
fn test_build_reports_directory_conflict() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "src", "not a directory");
    write_file(temp.path(), "tree.txt", "src/\n    main.rs\nnotes.md\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[FAIL]"))
        .stdout(predicate::str::contains("not a directory"));

    assert!(temp.path().join("notes.md").is_file());
}

#[test]
fn test_build_relocation_failure_keeps_going() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "helper.go", "package utils\n");
    write_file(temp.path(), "vendor", "not a directory");
    write_file(temp.path(), "tree.txt", "vendor/\n    helper.go\nafter.txt\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r"\[FAIL\]\s+vendor/helper\.go .*Failed to move").unwrap(),
        )
        .stdout(predicate::str::contains(
            "Summary: 0 Dirs | 1 Files | 0 Moved | 0 Skipped | 2 Failed",
        ));

    let kept = fs::read_to_string(temp.path().join("helper.go")).unwrap();
    assert_eq!(kept, "package utils\n");
    assert!(temp.path().join("after.txt").is_file());
}

#[test]
fn test_build_respects_root_flag() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();
    write_file(temp.path(), "tree.txt", "pkg/\n    mod.rs\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt", "--root", "out"])
        .assert()
        .success();

    assert!(out.join("pkg/mod.rs").is_file());
    assert!(!temp.path().join("pkg").exists());
}

#[test]
fn test_build_uses_project_placeholder() {
    let temp = tempdir().unwrap();
    write_file(
        temp.path(),
        ".dirctl.toml",
        "[build]\nplaceholder = \"// TODO: {name}\"\n",
    );
    write_file(temp.path(), "tree.txt", "lib/\n    util.js\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("lib/util.js")).unwrap();
    assert_eq!(content, "// TODO: util.js");
}

#[test]
fn test_build_rejects_invalid_project_config() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), ".dirctl.toml", "[build]\nplaceholder = \"no name\"\n");
    write_file(temp.path(), "tree.txt", "lib/\n");

    dirctl_in(temp.path())
        .args(["build", "tree.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));

    assert!(!temp.path().join("lib").exists());
}
