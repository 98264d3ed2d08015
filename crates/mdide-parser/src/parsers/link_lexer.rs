//! Extracts the target of the markdown link around a cursor column.
//!
//! All scans are bounded by the line and return `None` when a delimiter is
//! missing. Columns count `char`s.

use mdide_core::LinkSpan;
use serde::{Deserialize, Serialize};

/// Where the scan for a link starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexMode {
    /// Locate `[`, then `(`, then `)`. For cursors inside the label.
    BracketFirst,
    /// Locate `(`, then `)`. For cursors inside the target.
    ParenFirst,
}

/// Index of the last `needle` at or before `from`.
///
/// A `from` past the end starts the scan at the last character.
pub fn find_char_before(chars: &[char], from: usize, needle: char) -> Option<usize> {
    let last = chars.len().checked_sub(1)?;
    (0..=from.min(last)).rev().find(|&i| chars[i] == needle)
}

/// Index of the first `needle` at or after `from`.
pub fn find_char_after(chars: &[char], from: usize, needle: char) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == needle)
}

/// Find `needle` left of the cursor, falling back to the right of it
fn find_char_around(chars: &[char], column: usize, needle: char) -> Option<usize> {
    find_char_before(chars, column, needle).or_else(|| find_char_after(chars, column, needle))
}

/// Build the span between an opening `(` and the next `)`
fn span_from_paren(chars: &[char], open: usize) -> Option<LinkSpan> {
    let close = find_char_after(chars, open, ')')?;
    Some(LinkSpan {
        start: open,
        end: close,
        target: chars[open + 1..close].iter().collect(),
    })
}

/// Target of the link whose label surrounds or follows the cursor.
///
/// # Example
/// ```
/// use mdide_parser::extract_link_bracket_first;
///
/// let span = extract_link_bracket_first("see [Guide](guide.md)", 6).unwrap();
/// assert_eq!(span.target, "guide.md");
/// assert_eq!((span.start, span.end), (11, 20));
/// ```
pub fn extract_link_bracket_first(line: &str, column: usize) -> Option<LinkSpan> {
    let chars: Vec<char> = line.chars().collect();
    let bracket = find_char_around(&chars, column, '[')?;
    let open = find_char_after(&chars, bracket, '(')?;
    span_from_paren(&chars, open)
}

/// Target of the link whose parenthesized target surrounds or follows the cursor.
pub fn extract_link_paren_first(line: &str, column: usize) -> Option<LinkSpan> {
    let chars: Vec<char> = line.chars().collect();
    let open = find_char_around(&chars, column, '(')?;
    span_from_paren(&chars, open)
}

/// Dispatch to the extraction for `mode`
pub fn extract_link(line: &str, column: usize, mode: LexMode) -> Option<LinkSpan> {
    match mode {
        LexMode::BracketFirst => extract_link_bracket_first(line, column),
        LexMode::ParenFirst => extract_link_paren_first(line, column),
    }
}
