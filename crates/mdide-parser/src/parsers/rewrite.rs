//! Whole-document rewrites of link targets and link labels.
//!
//! Every function returns `Cow::Borrowed` of its input when nothing matched,
//! so callers detect a no-op with plain equality (or `matches!(.., Cow::Borrowed(_))`)
//! and skip writing the file. Targets and titles are matched literally.

use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;

/// Pattern matching `[label](target)` and `![alt](target)` for a literal target.
///
/// Group 1 is the optional `!`, group 2 the label. Labels stay on one line
/// and hold no brackets, so a stray `[` in prose never starts a match.
fn links_with_target(target: &str) -> Option<Regex> {
    Regex::new(&format!(r"(!?)\[([^\[\]\n]*)\]\({}\)", regex::escape(target))).ok()
}

/// Remove every link to `target`, brackets, label and parentheses included.
///
/// Image tags lose their leading `!` as well.
///
/// # Example
/// ```
/// use mdide_parser::remove_links_with_target;
///
/// let text = "See [Guide](guide.md) for more.";
/// assert_eq!(remove_links_with_target(text, "guide.md"), "See  for more.");
/// ```
pub fn remove_links_with_target<'t>(text: &'t str, target: &str) -> Cow<'t, str> {
    if !text.contains(target) {
        return Cow::Borrowed(text);
    }
    match links_with_target(target) {
        Some(re) => re.replace_all(text, NoExpand("")),
        None => Cow::Borrowed(text),
    }
}

/// Point every link to `old_target` at `new_target`, keeping its label.
///
/// # Example
/// ```
/// use mdide_parser::replace_link_target;
///
/// let text = "[A](old.md)\n[B](other.md)";
/// assert_eq!(
///     replace_link_target(text, "old.md", "new.md"),
///     "[A](new.md)\n[B](other.md)"
/// );
/// ```
pub fn replace_link_target<'t>(text: &'t str, old_target: &str, new_target: &str) -> Cow<'t, str> {
    if !text.contains(old_target) {
        return Cow::Borrowed(text);
    }
    match links_with_target(old_target) {
        Some(re) => re.replace_all(text, |caps: &Captures| {
            format!("{}[{}]({})", &caps[1], &caps[2], new_target)
        }),
        None => Cow::Borrowed(text),
    }
}

/// Relabels links to one document after its title changed.
///
/// Only links whose label equals the old title *and* whose target equals
/// the document path are touched: the pair is the match key.
#[derive(Debug, Clone)]
pub struct TitleReplacer {
    pattern: Option<Regex>,
    replacement: String,
}

impl TitleReplacer {
    /// Create a replacer for links `[old_title](document_path)`
    pub fn new(old_title: &str, document_path: &str, new_title: &str) -> Self {
        let pattern = Regex::new(&format!(
            r"\[{}\]\({}\)",
            regex::escape(old_title),
            regex::escape(document_path)
        ))
        .ok();
        Self {
            pattern,
            replacement: format!("[{}]({})", new_title, document_path),
        }
    }

    /// Rewrite the given document text
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.pattern {
            Some(re) => re.replace_all(text, NoExpand(&self.replacement)),
            None => Cow::Borrowed(text),
        }
    }
}

/// Create a [`TitleReplacer`] bound to the path of the renamed document,
/// relative to the documents it will be applied to.
///
/// # Example
/// ```
/// use mdide_parser::replace_title_phrase;
///
/// let replace = replace_title_phrase("Old", "doc.md", "New");
/// assert_eq!(replace.apply("see [Old](doc.md)"), "see [New](doc.md)");
/// assert_eq!(replace.apply("see [Old](other.md)"), "see [Old](other.md)");
/// ```
pub fn replace_title_phrase(
    old_title: &str,
    self_relative_path: &str,
    new_title: &str,
) -> TitleReplacer {
    TitleReplacer::new(old_title, self_relative_path, new_title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_remove_link_keeps_surrounding_text() {
        let text = "See [Guide](guide.md) for more.";
        assert_snapshot!(remove_links_with_target(text, "guide.md"), @"See  for more.");
    }

    #[test]
    fn test_remove_all_occurrences() {
        let text = "[a](x.md) one\ntwo [b](x.md) [c](y.md)\n[d](x.md)";
        assert_eq!(
            remove_links_with_target(text, "x.md"),
            " one\ntwo  [c](y.md)\n"
        );
    }

    #[test]
    fn test_remove_keeps_stray_bracket_on_same_line() {
        let text = "the interval [0, 1) and [Guide](guide.md) end";
        assert_snapshot!(remove_links_with_target(text, "guide.md"), @"the interval [0, 1) and  end");
    }

    #[test]
    fn test_remove_keeps_stray_bracket_on_earlier_line() {
        let text = "Use a[i\nfor indexing.\nSee [Guide](guide.md) here.";
        assert_eq!(
            remove_links_with_target(text, "guide.md"),
            "Use a[i\nfor indexing.\nSee  here."
        );
    }

    #[test]
    fn test_label_spanning_lines_is_not_a_link() {
        let text = "[first\nsecond](guide.md)";
        let result = remove_links_with_target(text, "guide.md");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(replace_link_target(text, "guide.md", "new.md"), text);
    }

    #[test]
    fn test_remove_image_tag() {
        let text = "logo: ![Logo](img/logo.png) end";
        assert_snapshot!(remove_links_with_target(text, "img/logo.png"), @"logo:  end");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let text = "[a](gone.md) and [b](stay.md) and [c](gone.md)";
        let once = remove_links_with_target(text, "gone.md").into_owned();
        let twice = remove_links_with_target(&once, "gone.md");
        assert_eq!(twice, once);
        assert!(matches!(twice, Cow::Borrowed(_)));
    }

    #[test]
    fn test_remove_requires_exact_target() {
        let text = "[a](guide.md.bak) [b](my-guide.md) [c](../guide.md)";
        let result = remove_links_with_target(text, "guide.md");
        assert_eq!(result, text);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_remove_escapes_metacharacters() {
        let text = "[x](a+b (1).md) [y](aab 1.md)";
        assert_eq!(
            remove_links_with_target(text, "a+b (1).md"),
            " [y](aab 1.md)"
        );
        assert_eq!(
            remove_links_with_target("[x](a+b.md) [y](aab.md)", "a+b.md"),
            " [y](aab.md)"
        );
    }

    #[test]
    fn test_replace_target_across_lines() {
        let text = "[A](old.md)\n[B](other.md)";
        assert_eq!(
            replace_link_target(text, "old.md", "new.md"),
            "[A](new.md)\n[B](other.md)"
        );

        let text = "[A](old.md) [A again](old.md)\n\n* [B](old.md)\n";
        assert_eq!(
            replace_link_target(text, "old.md", "sub/new.md"),
            "[A](sub/new.md) [A again](sub/new.md)\n\n* [B](sub/new.md)\n"
        );
    }

    #[test]
    fn test_replace_target_keeps_image_marker() {
        assert_eq!(
            replace_link_target("![pic](a.png)", "a.png", "b.png"),
            "![pic](b.png)"
        );
    }

    #[test]
    fn test_replace_target_identity_without_match() {
        let text = "[A](one.md) plain old.md mention";
        let result = replace_link_target(text, "old.md", "new.md");
        assert!(matches!(result, Cow::Borrowed(s) if std::ptr::eq(s, text)));
    }

    #[test]
    fn test_replace_target_literal_dollar() {
        assert_eq!(
            replace_link_target("[a](x.md)", "x.md", "$1.md"),
            "[a]($1.md)"
        );
    }

    #[test]
    fn test_title_replacer_matches_label_and_target() {
        let replace = replace_title_phrase("Old Title", "../docs/guide.md", "New Title");
        let text = "[Old Title](../docs/guide.md)\n[Old Title](other.md)\n[Other](../docs/guide.md)";
        assert_eq!(
            replace.apply(text),
            "[New Title](../docs/guide.md)\n[Old Title](other.md)\n[Other](../docs/guide.md)"
        );
    }

    #[test]
    fn test_title_replacer_no_change() {
        let replace = replace_title_phrase("Missing", "doc.md", "Found");
        let text = "[Present](doc.md)";
        assert!(matches!(replace.apply(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_title_replacer_metacharacters() {
        let replace = replace_title_phrase("C++ (lang)", "c++.md", "C++ $0");
        assert_eq!(
            replace.apply("see [C++ (lang)](c++.md)!"),
            "see [C++ $0](c++.md)!"
        );
    }
}
