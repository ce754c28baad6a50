//! # Dirctl Tree-Notation Line Parser
//!
//! File: cli/src/tree/parser.rs
//!
//! ## Overview
//!
//! Turns one line of tree notation into a `ParsedLine` (a sanitized name plus
//! the column it starts at), or nothing when the line carries no entry.
//!
//! A line is read as `<layout prefix><name>[# comment]`:
//!
//! ```text
//! │   ├── handlers/      # request handlers
//! └─┬─┘└──┬──┘
//!  prefix  name
//! ```
//!
//! The layout prefix is the longest run of whitespace and connector glyphs
//! (`│ ├ └ ─ | + -`). Its width, with each tab counted as four columns, is the
//! entry's depth. Lines never fail to parse: anything without a usable name is
//! dropped.
//!
use tracing::trace;

/// Columns a tab contributes to the depth of an entry.
pub const TAB_WIDTH: usize = 4;
/// Everything from this character to the end of the line is ignored.
const COMMENT_MARKER: char = '#';
/// Characters stripped from both ends of a name.
const QUOTE_CHARS: &[char] = &['*', '"', '`', '\''];
/// Path separators accepted in names (leading ones are stripped, trailing ones mark a directory).
pub const SEPARATORS: &[char] = &['/', '\\'];

/// One non-empty entry of a tree-notation document, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// The sanitized entry name. May still end with a separator.
    pub name: String,
    /// Column of the name within its line, tabs expanded.
    pub depth: usize,
}

impl ParsedLine {
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }
}

/// Parses a whole document, keeping document order and dropping nameless lines.
pub fn parse_document(text: &str) -> Vec<ParsedLine> {
    text.lines().filter_map(parse_line).collect()
}

/// Parses a single line of tree notation.
///
/// Returns `None` for blank lines, comment-only lines, lines made only of
/// connector glyphs, and lines whose name is empty after sanitizing.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let content = line
        .split(COMMENT_MARKER)
        .next()
        .unwrap_or_default()
        .trim_end();
    if content.is_empty() {
        return None;
    }

    let prefix_len = content
        .find(|c: char| !is_layout_char(c))
        .unwrap_or(content.len());
    let (prefix, remainder) = content.split_at(prefix_len);

    let name = sanitize_name(remainder)?;
    let depth = prefix
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();

    trace!("Parsed line {:?} -> name={:?} depth={}", line, name, depth);
    Some(ParsedLine { name, depth })
}

fn is_layout_char(c: char) -> bool {
    c.is_whitespace() || matches!(c, '│' | '├' | '└' | '─' | '|' | '+' | '-')
}

/// Trims the raw name, strips surrounding quotes, then any leading separators.
fn sanitize_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_matches(QUOTE_CHARS)
        .trim_start_matches(SEPARATORS);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
