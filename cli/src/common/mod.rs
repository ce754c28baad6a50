//! # Dirctl Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that are not specific to either direction of the tree
//! engine. Command handlers and the builder import from the submodules directly:
//!
//! ```rust
//! use crate::common::fs::io;
//! ```
//!

/// Utilities for filesystem operations (I/O, create-only writes, moves).
pub mod fs;
