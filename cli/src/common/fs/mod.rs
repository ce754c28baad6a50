//! # Dirctl Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Entry point for filesystem helpers. Everything currently lives in `io`:
//! directory creation, reading, overwriting and create-only writes, and file moves.
//!
//! ```rust
//! use crate::common::fs::io;
//! io::ensure_dir_exists(target_path)?;
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `create_new_file`, `move_file`, ...).
pub mod io;
