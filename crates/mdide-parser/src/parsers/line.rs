//! Helpers for lines of text.

/// Number of lines in the given text: newline count plus one.
///
/// A trailing newline yields a final empty line that is counted too.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// The first line of the given text, without its newline.
pub fn first_line(text: &str) -> &str {
    match text.find('\n') {
        Some(end) => &text[..end],
        None => text,
    }
}

/// The given line with leading `#` markers and the spaces after them removed.
///
/// Both passes always run, so a line without `#` still loses its leading
/// spaces.
pub fn strip_heading_marker(line: &str) -> &str {
    line.trim_start_matches('#').trim_start_matches(' ')
}
