//! # Dirctl CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`build.rs`, `generate.rs`,
//! `main_tests.rs`). Each `.rs` file in `cli/tests/` is compiled as its own
//! test crate and runs the compiled `dirctl` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates an `assert_cmd::Command` for the compiled `dirctl` binary.
///
/// ## Panics
/// Panics if the `dirctl` binary cannot be found via `Command::cargo_bin`.
pub fn dirctl_cmd() -> Command {
    Command::cargo_bin("dirctl").expect("Failed to find dirctl binary for testing")
}

/// A `dirctl` command running inside `dir`, isolated from the user's configuration.
///
/// The user config directory is pointed at a hidden folder inside `dir`, which
/// `generate` skips like any other hidden entry.
pub fn dirctl_in(dir: &Path) -> Command {
    let mut cmd = dirctl_cmd();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Every non-hidden path below `root`, relative and sorted, directories suffixed with `/`.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, root, &mut out);
    out.sort();
    out
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let entry = entry.expect("Failed to read entry");
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let rel = path
            .strip_prefix(root)
            .expect("Entry outside root")
            .to_string_lossy()
            .replace('\\', "/");
        if path.is_dir() {
            out.push(format!("{}/", rel));
            collect(root, &path, out);
        } else {
            out.push(rel);
        }
    }
}
