//! Decides which kind of completion the text before the cursor asks for.

use mdide_core::AutocompleteKind;

/// Classify the completion needed at `column` of `line`.
///
/// Scans left from the character before the cursor for `[`. An opening
/// bracket preceded by `!` starts an image tag, any other one a markdown
/// link. When no bracket is found after index 0, the first character of the
/// line decides: `[` is a link, `#` a heading.
///
/// Callers must not classify the first line of a document, which holds
/// the document title.
///
/// # Example
/// ```
/// use mdide_parser::classify_autocomplete;
/// use mdide_core::AutocompleteKind;
///
/// assert_eq!(classify_autocomplete("see [", 5), AutocompleteKind::MarkdownLink);
/// assert_eq!(classify_autocomplete("![", 2), AutocompleteKind::Image);
/// assert_eq!(classify_autocomplete("## Sec", 6), AutocompleteKind::Heading);
/// ```
pub fn classify_autocomplete(line: &str, column: usize) -> AutocompleteKind {
    let chars: Vec<char> = line.chars().collect();
    let column = column.min(chars.len());
    // At column 0 there is nothing left of the cursor; the first character decides.
    match (1..column).rev().find(|&i| chars[i] == '[') {
        Some(i) if chars[i - 1] == '!' => AutocompleteKind::Image,
        Some(_) => AutocompleteKind::MarkdownLink,
        None => match chars.first() {
            Some('[') => AutocompleteKind::MarkdownLink,
            Some('#') => AutocompleteKind::Heading,
            _ => AutocompleteKind::None,
        },
    }
}
