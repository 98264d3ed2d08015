//! Locates the first occurrence of a phrase or link inside a document.

use mdide_core::{CursorPosition, TextRange};
use regex::Regex;

/// Lines of a document, split on `\n` or `\r\n`
fn split_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
}

/// Column (in chars) of a byte offset within a line
fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count()
}

/// Range of the first occurrence of `phrase` in `text`.
///
/// # Example
/// ```
/// use mdide_parser::locate_phrase;
/// use mdide_core::TextRange;
///
/// assert_eq!(locate_phrase("bar\nfoobaz\n", "foo"), Some(TextRange::on_line(1, 0, 3)));
/// ```
pub fn locate_phrase(text: &str, phrase: &str) -> Option<TextRange> {
    split_lines(text).find_map(|(line_idx, line)| {
        line.find(phrase).map(|offset| {
            let column = char_column(line, offset);
            TextRange::on_line(line_idx, column, column + phrase.chars().count())
        })
    })
}

/// Position of the `[` of the first link `[...](target)` in `text`.
///
/// The target is matched literally.
pub fn locate_link_with_target(text: &str, target: &str) -> Option<CursorPosition> {
    let re = Regex::new(&format!(r"\[[^\]]*\]\({}\)", regex::escape(target))).ok()?;
    split_lines(text).find_map(|(line_idx, line)| {
        re.find(line)
            .map(|m| CursorPosition::new(line_idx, char_column(line, m.start())))
    })
}
