//! # Dirctl Structure File Discovery
//!
//! File: cli/src/tree/discovery.rs
//!
//! ## Overview
//!
//! Finds a tree-notation file in the working root when `dirctl build` is run
//! without one. This is a convenience only; a file named on the command line
//! always takes precedence.
//!
//! ## Strategy
//!
//! 1. **Candidate names**: the configured names (`directory-structure.txt`,
//!    `dir-structure.txt`, `structure.txt`, `tree.txt` by default) are checked
//!    in order. The first one that is a regular file wins.
//! 2. **Sniffing**: `.txt` files, then `.md` files, directly in the root (each
//!    group sorted by name) are inspected. A file qualifies when its first lines
//!    contain a connector pattern (`├──`, `└──`, `+--`, `|--`, `|` followed by
//!    two blanks, or a `- ` bullet), or when more than three of them are indented.
//!
use crate::core::config::DiscoveryConfig;
use crate::tree::serializer::SYSTEM_EXCLUDES;
use regex::Regex;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extensions considered when sniffing, in priority order.
const SNIFF_EXTENSIONS: &[&str] = &["txt", "md"];
/// A file with more indented lines than this in its head looks like a tree.
const INDENTED_LINE_THRESHOLD: usize = 3;

fn tree_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"(?m)├──|└──|\+--|\|--|\|\s\s|^\s*-\s").expect("tree marker regex is valid")
    })
}

/// Locates the structure file for `root`, or `None` when nothing qualifies.
pub fn find_structure_file(root: &Path, config: &DiscoveryConfig) -> Option<PathBuf> {
    info!("Scanning {} for a structure file...", root.display());

    for candidate in &config.candidates {
        let path = root.join(candidate);
        if path.is_file() {
            info!("Found candidate structure file: {}", path.display());
            return Some(path);
        }
    }

    for path in sniff_candidates(root) {
        if is_likely_structure_file(&path, config.sniff_lines) {
            info!("Detected tree notation in: {}", path.display());
            return Some(path);
        }
        debug!("No tree notation in {}", path.display());
    }

    None
}

/// Files directly in `root` eligible for sniffing, `.txt` before `.md`, each sorted by name.
fn sniff_candidates(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            !SYSTEM_EXCLUDES.contains(&&*name)
        })
        .map(|entry| entry.into_path())
        .filter(|path| extension_rank(path).is_some())
        .collect();
    // Stable sort keeps the by-name order within each extension group.
    files.sort_by_key(|path| extension_rank(path));
    files
}

fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    SNIFF_EXTENSIONS
        .iter()
        .position(|e| e.eq_ignore_ascii_case(ext))
}

/// Reports whether the first `sniff_lines` lines of `path` look like tree notation.
///
/// Unreadable files and directories are never structure files.
pub fn is_likely_structure_file(path: &Path, sniff_lines: usize) -> bool {
    if path.is_dir() {
        return false;
    }
    match read_head(path, sniff_lines) {
        Ok(head) => {
            let head: Vec<&str> = head.iter().map(String::as_str).collect();
            looks_like_tree(&head)
        }
        Err(e) => {
            debug!("Could not read {} while sniffing: {}", path.display(), e);
            false
        }
    }
}

/// Reads at most `max_lines` lines from the start of `path`, decoding invalid UTF-8 lossily.
fn read_head(path: &Path, max_lines: usize) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    reader
        .split(b'\n')
        .take(max_lines)
        .map(|line| {
            let bytes = line?;
            Ok(String::from_utf8_lossy(&bytes)
                .trim_end_matches('\r')
                .to_string())
        })
        .collect()
}

fn looks_like_tree(head: &[&str]) -> bool {
    if tree_marker().is_match(&head.join("\n")) {
        return true;
    }
    let indented = head
        .iter()
        .filter(|line| line.starts_with(' ') || line.starts_with('\t'))
        .count();
    indented > INDENTED_LINE_THRESHOLD
}
