//! # Dirctl Node Classifier
//!
//! File: cli/src/tree/classifier.rs
//!
//! ## Overview
//!
//! Tree notation rarely says outright whether an entry is a directory. This
//! module decides it for every parsed line using an ordered rule table; the
//! first rule that returns a verdict wins:
//!
//! | # | Rule               | Verdict   | Fires when                                        |
//! |---|--------------------|-----------|---------------------------------------------------|
//! | 1 | `ExplicitMarker`   | directory | name ends with `/` or `\`                         |
//! | 2 | `Extension`        | file      | name has a `.` and does not start with one        |
//! | 3 | `HasChildren`      | directory | the next line is indented deeper                  |
//! | 4 | `ConventionalName` | directory | name is `src`, `lib`, `tests`, ... (any case)      |
//! | 5 | `Fallback`         | file      | always                                            |
//!
//! Classification is total: every `ParsedLine` becomes exactly one `Node`.
//!
use super::parser::{ParsedLine, SEPARATORS};
use std::fmt;
use tracing::debug;

/// Names treated as directories even without children or a trailing slash.
const CONVENTIONAL_DIRS: &[&str] = &[
    "src",
    "lib",
    "tests",
    "docs",
    "build",
    "dist",
    "bin",
    "assets",
    "components",
    "config",
    "public",
];

/// Whether a node is materialized as a directory or as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// The rule that produced a node's `NodeKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationRule {
    ExplicitMarker,
    Extension,
    HasChildren,
    ConventionalName,
    Fallback,
}

impl fmt::Display for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ExplicitMarker => "explicit marker",
            Self::Extension => "extension",
            Self::HasChildren => "has children",
            Self::ConventionalName => "conventional name",
            Self::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// A classified entry of a tree-notation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Final entry name, without trailing separators.
    pub name: String,
    /// Column of the name in its source line.
    pub depth: usize,
    pub kind: NodeKind,
    pub rule: ClassificationRule,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// A rule looks at a line and the line after it, and may return a verdict.
type Verdict = fn(&ParsedLine, Option<&ParsedLine>) -> Option<NodeKind>;

/// Rules in evaluation order. `Fallback` is applied when none of these match.
const RULES: &[(ClassificationRule, Verdict)] = &[
    (ClassificationRule::ExplicitMarker, explicit_marker),
    (ClassificationRule::Extension, has_extension),
    (ClassificationRule::HasChildren, has_children),
    (ClassificationRule::ConventionalName, conventional_name),
];

fn explicit_marker(line: &ParsedLine, _next: Option<&ParsedLine>) -> Option<NodeKind> {
    line.name
        .ends_with(SEPARATORS)
        .then_some(NodeKind::Directory)
}

/// Dot-prefixed names (`.github`, `.config.d`) never count as having an extension.
fn has_extension(line: &ParsedLine, _next: Option<&ParsedLine>) -> Option<NodeKind> {
    (line.name.contains('.') && !line.name.starts_with('.')).then_some(NodeKind::File)
}

fn has_children(line: &ParsedLine, next: Option<&ParsedLine>) -> Option<NodeKind> {
    next.filter(|n| n.depth > line.depth)
        .map(|_| NodeKind::Directory)
}

fn conventional_name(line: &ParsedLine, _next: Option<&ParsedLine>) -> Option<NodeKind> {
    CONVENTIONAL_DIRS
        .iter()
        .any(|d| d.eq_ignore_ascii_case(&line.name))
        .then_some(NodeKind::Directory)
}

/// Classifies a single line given the line that follows it in document order.
pub fn classify_line(line: &ParsedLine, next: Option<&ParsedLine>) -> (ClassificationRule, NodeKind) {
    RULES
        .iter()
        .find_map(|(rule, verdict)| verdict(line, next).map(|kind| (*rule, kind)))
        .unwrap_or((ClassificationRule::Fallback, NodeKind::File))
}

/// Classifies every parsed line, preserving document order.
pub fn classify(lines: Vec<ParsedLine>) -> Vec<Node> {
    let kinds: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| classify_line(line, lines.get(i + 1)))
        .collect();

    lines
        .into_iter()
        .zip(kinds)
        .map(|(line, (rule, kind))| {
            let name = match rule {
                ClassificationRule::ExplicitMarker => {
                    line.name.trim_end_matches(SEPARATORS).to_string()
                }
                _ => line.name,
            };
            debug!("Classified '{}' as {:?} ({})", name, kind, rule);
            Node {
                name,
                depth: line.depth,
                kind,
                rule,
            }
        })
        .collect()
}
