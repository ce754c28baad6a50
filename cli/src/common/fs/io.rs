//! # Dirctl Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem mutations performed by dirctl. It
//! provides wrappers around `std::fs` that add context to errors and encode the
//! two write policies the tool relies on:
//!
//! - **`ensure_dir_exists`**: creates a directory and any missing parents. An
//!   existing directory is not an error; an existing non-directory is.
//! - **`read_file_to_string`**: `fs::read_to_string` with the path in the error.
//! - **`write_string_to_file`**: writes (and overwrites) a file, creating its
//!   parent first. Used for the generated structure document.
//! - **`create_new_file`**: writes a file that must not exist yet. Used when
//!   scaffolding, so user files are never clobbered.
//! - **`move_file`**: renames a file, falling back to copy + remove only when
//!   the rename crosses filesystems. A failed fallback removes its copy.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(Path::new("src/handlers"))?;
//! io::create_new_file(Path::new("src/handlers/mod.rs"), "# Placeholder for mod.rs")?;
//! io::move_file(Path::new("helper.go"), Path::new("utils/helper.go"))?;
//! ```
//!
use crate::core::error::{DirctlError, Result};
use anyhow::Context;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory, including
/// any necessary parent directories (similar to `mkdir -p`). If the path already
/// exists but is not a directory, a `DirctlError::FileSystem` is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(DirctlError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, read, or is not valid UTF-8,
/// with context indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a specified file path, overwriting if it exists.
///
/// The parent directory of `path` is created first when missing.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or the write fails.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Creates a new file containing `content`, failing if anything already exists at `path`.
///
/// The parent directory of `path` is created first when missing.
///
/// # Errors
///
/// Returns an `Err` if the parent cannot be created, the path already exists,
/// or writing the content fails.
pub fn create_new_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create file {:?}", path))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Created file: {:?}", path);
    Ok(())
}

/// Moves the file at `from` to `to`.
///
/// A plain rename is attempted first. Only when it fails because the paths are
/// on different filesystems is the file copied to `to` and `from` removed. Any
/// other rename error is returned as is. The destination's parent must already exist.
///
/// Returns the raw `io::Error` so callers can attach both paths to it.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => {
            debug!("Renamed {:?} -> {:?}", from, to);
            Ok(())
        }
        Err(rename_err) if rename_err.kind() == io::ErrorKind::CrossesDevices => {
            warn!(
                "Rename {:?} -> {:?} crosses filesystems, falling back to copy.",
                from, to
            );
            copy_then_remove(from, to, |path| fs::remove_file(path))
        }
        Err(rename_err) => Err(rename_err),
    }
}

/// Copies `from` to `to`, then removes `from` with `remove_source`.
///
/// When the source cannot be removed the copy is deleted again, so a failed
/// move never leaves the file in both places.
fn copy_then_remove<F>(from: &Path, to: &Path, remove_source: F) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    fs::copy(from, to)?;
    if let Err(remove_err) = remove_source(from) {
        if let Err(cleanup_err) = fs::remove_file(to) {
            warn!("Could not remove partial copy {:?}: {}", to, cleanup_err);
        }
        return Err(remove_err);
    }
    debug!("Copied and removed {:?} -> {:?}", from, to);
    Ok(())
}
