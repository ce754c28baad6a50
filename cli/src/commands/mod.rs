//! # Dirctl Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the dirctl CLI. Each module defines its `clap`
//! argument struct and a `handle_*` function called from `main.rs`.
//!
//! - `build`: tree notation → filesystem
//! - `generate`: filesystem → tree notation
//!

/// `dirctl build`: materialize a tree-notation file.
pub mod build;
/// `dirctl generate`: describe a directory in tree notation.
pub mod generate;
