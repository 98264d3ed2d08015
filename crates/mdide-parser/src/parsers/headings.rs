//! Heading collection: # H1, ## H2, etc.
//!
//! Headings are kept as raw lines, markers included, so `# A` and `## A`
//! stay distinct. Markers are only stripped for display.

use mdide_core::HeadingSet;

/// Whether the line is a heading: its first non-whitespace character is `#`
pub fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Distinct heading lines of the given document
pub fn headings_in_text(text: &str) -> HeadingSet {
    text.lines()
        .filter(|line| is_heading(line))
        .map(str::to_string)
        .collect()
}

/// Distinct heading lines across several documents
pub fn headings_in_texts<I, S>(texts: I) -> HeadingSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .flat_map(|text| headings_in_text(text.as_ref()))
        .collect()
}

/// Completion label of a heading: the heading without its first character,
/// which the user has already typed.
pub fn heading_completion_label(heading: &str) -> &str {
    let mut chars = heading.chars();
    chars.next();
    chars.as_str()
}
