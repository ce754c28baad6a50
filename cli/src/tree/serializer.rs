//! # Dirctl Tree Serializer
//!
//! File: cli/src/tree/serializer.rs
//!
//! ## Overview
//!
//! Renders an existing directory as tree notation, similar to the output of
//! the `tree` command-line utility, in a form the builder can read back.
//!
//! ## Architecture
//!
//! - Recursive directory traversal with entries sorted by name
//! - Connector lines (`├──`, `└──`, `│`) with the corner marking the last sibling
//! - Directory names suffixed with `/` so they classify as explicit directories
//! - Skipping of hidden entries, tooling directories, and configured excludes
//! - Basic cycle detection for symlinks (using canonical paths)
//! - File and directory counts accumulated over the whole walk
//!
//! ## Usage
//!
//! ```rust
//! let serializer = TreeSerializer::new().with_excludes(&cfg.generate.excludes);
//! let (tree, stats) = serializer.render_tree(&root)?;
//! let document = render_document(&root_label(&root), &tree, stats);
//! ```
//!
//! Example document:
//!
//! ```text
//! # Generated Structure
//! # Files: 3 | Dirs: 2
//!
//! my-service/
//! ├── cmd/
//! │   └── main.go
//! ├── internal/
//! │   └── store.go
//! └── go.mod
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::{
    collections::HashSet,
    fmt::Write as FmtWrite,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

// --- Constants for Tree Drawing ---

/// Connector for intermediate items in a directory listing ("T" shape).
pub const TEE: &str = "├── ";
/// Connector for the last item in a directory listing ("L" shape).
pub const ELBOW: &str = "└── ";
/// Vertical line used for ongoing indentation levels.
pub const PIPE: &str = "│   ";
/// Spacer used for indentation levels after the last item has been printed.
pub const SPACER: &str = "    ";

/// Entry names never included in a generated tree.
pub const SYSTEM_EXCLUDES: &[&str] = &[
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "node_modules",
    ".DS_Store",
    ".env",
    ".gitignore",
    "thumbs.db",
    ".idea",
    ".vscode",
];

/// Totals gathered during one walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub files: usize,
    pub dirs: usize,
}

/// A single entry read from the filesystem.
struct DirEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Walks directories and renders them as tree notation.
#[derive(Debug, Clone)]
pub struct TreeSerializer {
    excludes: HashSet<String>,
}

impl Default for TreeSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSerializer {
    /// Creates a serializer excluding the system names and this program's own executable name.
    pub fn new() -> Self {
        let mut excludes: HashSet<String> =
            SYSTEM_EXCLUDES.iter().map(|s| s.to_string()).collect();
        if let Some(own_name) = invocation_name() {
            excludes.insert(own_name);
        }
        Self { excludes }
    }

    /// Adds entry names to skip on top of the defaults.
    pub fn with_excludes<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excludes
            .extend(extra.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.') || self.excludes.contains(name)
    }

    /// Renders the tree below `root_path` (without a root line) and counts its entries.
    ///
    /// ## Errors
    ///
    /// Fails if `root_path` is missing, is not a directory, or cannot be listed.
    /// Nested directories that cannot be listed are logged and rendered empty.
    pub fn render_tree(&self, root_path: &Path) -> Result<(String, TreeStats)> {
        if !root_path.exists() {
            anyhow::bail!(
                "Cannot generate tree: Path '{}' does not exist.",
                root_path.display()
            );
        }
        if !root_path.is_dir() {
            anyhow::bail!(
                "Cannot generate tree: Path '{}' is not a directory.",
                root_path.display()
            );
        }

        let mut visited = HashSet::new();
        match root_path.canonicalize() {
            Ok(canonical_root) => {
                visited.insert(canonical_root);
            }
            Err(e) => warn!(
                "Could not canonicalize root path '{}': {}. Cycle detection might be affected.",
                root_path.display(),
                e
            ),
        }

        let entries = self.read_sorted_entries(root_path)?;
        let mut output = String::new();
        let mut stats = TreeStats::default();
        self.write_entries(
            entries,
            &mut String::new(),
            &mut visited,
            &mut stats,
            &mut output,
        )
        .context("Failed while generating directory tree string")?;

        Ok((output, stats))
    }

    fn write_entries(
        &self,
        entries: Vec<DirEntry>,
        current_prefix: &mut String,
        visited: &mut HashSet<PathBuf>,
        stats: &mut TreeStats,
        output: &mut dyn FmtWrite,
    ) -> Result<()> {
        let num_entries = entries.len();
        for (index, entry) in entries.into_iter().enumerate() {
            let is_last_entry = index == num_entries - 1;
            let connector = if is_last_entry { ELBOW } else { TEE };

            if !entry.is_dir {
                stats.files += 1;
                writeln!(output, "{}{}{}", current_prefix, connector, entry.name)?;
                continue;
            }

            stats.dirs += 1;
            writeln!(output, "{}{}{}/", current_prefix, connector, entry.name)?;

            if !self.first_visit(&entry.path, visited) {
                continue;
            }

            let children = match self.read_sorted_entries(&entry.path) {
                Ok(children) => children,
                Err(e) => {
                    warn!("{:#}. Rendering it as empty.", e);
                    continue;
                }
            };

            let prefix_component = if is_last_entry { SPACER } else { PIPE };
            current_prefix.push_str(prefix_component);
            let walked = self.write_entries(children, current_prefix, visited, stats, output);
            current_prefix.truncate(current_prefix.len() - prefix_component.len());
            walked?;
        }
        Ok(())
    }

    /// Records a directory's canonical path, returning false if it was already walked.
    fn first_visit(&self, path: &Path, visited: &mut HashSet<PathBuf>) -> bool {
        match path.canonicalize() {
            Ok(canonical_path) => {
                if visited.insert(canonical_path) {
                    true
                } else {
                    warn!(
                        "Detected symlink cycle or duplicate traversal for: '{}'. Skipping subtree.",
                        path.display()
                    );
                    false
                }
            }
            Err(e) => {
                warn!(
                    "Could not canonicalize path '{}': {}. Skipping cycle check.",
                    path.display(),
                    e
                );
                true
            }
        }
    }

    /// Lists `dir`, dropping excluded entries, sorted by name.
    fn read_sorted_entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let read_dir_iter = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory entries from '{}'", dir.display()))?;

        let mut collected_entries = Vec::new();
        for entry_result in read_dir_iter {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    warn!(
                        "Failed to process directory entry in '{}': {}. Skipping.",
                        dir.display(),
                        e
                    );
                    continue;
                }
            };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if self.is_excluded(&name) {
                debug!("Skipping excluded entry: {}", path.display());
                continue;
            }

            // Follows symlinks; broken links fall back to files.
            let is_dir = match fs::metadata(&path) {
                Ok(md) => md.is_dir(),
                Err(e) => {
                    warn!(
                        "Could not get metadata for '{}': {}. Assuming file.",
                        path.display(),
                        e
                    );
                    false
                }
            };
            collected_entries.push(DirEntry { path, name, is_dir });
        }

        collected_entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(collected_entries)
    }
}

/// Assembles the full generated document: count header, root label, tree.
pub fn render_document(root_label: &str, tree: &str, stats: TreeStats) -> String {
    format!(
        "# Generated Structure\n# Files: {} | Dirs: {}\n\n{}/\n{}",
        stats.files, stats.dirs, root_label, tree
    )
}

/// The base name used as the root line of a generated document.
pub fn root_label(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| resolved.display().to_string())
}

/// The file name this program was started as, if any.
fn invocation_name() -> Option<String> {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
}
