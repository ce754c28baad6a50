//! # Dirctl Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout dirctl. Fatal errors
//! abort a command before anything on disk is touched; per-node errors raised
//! while materializing a tree are caught by the builder and reported next to
//! the node that caused them.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `DirctlError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover:
//! - Structure file discovery and parsing (`MissingInputFile`, `NoValidNodes`)
//! - Per-node build failures (`Relocation`, `DirectoryConflict`, `Scaffold`)
//! - Configuration and generic filesystem errors
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if nodes.is_empty() {
//!     anyhow::bail!(DirctlError::NoValidNodes { path: file.to_path_buf() });
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the dirctl application.
#[derive(Error, Debug)]
pub enum DirctlError {
    #[error("No structure file found at '{}'. Name one explicitly, e.g. `dirctl build tree.txt`.", searched.display())]
    MissingInputFile { searched: PathBuf },

    #[error("No valid nodes found in '{}'.", path.display())]
    NoValidNodes { path: PathBuf },

    #[error("Failed to move '{}' to '{}': {reason}", from.display(), to.display())]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("'{}' already exists but is not a directory.", path.display())]
    DirectoryConflict { path: PathBuf },

    #[error("Failed to scaffold '{}': {reason}", path.display())]
    Scaffold { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
