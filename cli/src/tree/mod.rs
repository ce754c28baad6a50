//! # Dirctl Tree Engine
//!
//! File: cli/src/tree/mod.rs
//!
//! ## Overview
//!
//! The bidirectional engine behind both commands.
//!
//! Build direction (`dirctl build`):
//!
//! ```text
//! text ──parser──> ParsedLine* ──classifier──> Node* ──builder──> filesystem
//! ```
//!
//! Generate direction (`dirctl generate`):
//!
//! ```text
//! filesystem ──serializer──> tree notation + TreeStats
//! ```
//!
//! The two directions share no state. `discovery` locates an input file for
//! the build direction when none is given.
//!

/// Tree builder: stack-based parent resolution and filesystem materialization.
pub mod builder;
/// Ordered directory/file classification rules.
pub mod classifier;
/// Structure-file discovery (candidate names, then content sniffing).
pub mod discovery;
/// Single-line tree-notation parser.
pub mod parser;
/// Directory walk rendered back into tree notation.
pub mod serializer;

use classifier::Node;

/// Parses and classifies a complete tree-notation document.
pub fn read_nodes(text: &str) -> Vec<Node> {
    classifier::classify(parser::parse_document(text))
}
