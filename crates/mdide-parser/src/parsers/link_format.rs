//! Builds markdown link and image tag strings for completion items.

use mdide_core::TitleRule;

use super::headings::is_heading;
use super::line::{first_line, strip_heading_marker};

/// Last segment of a `/` or `\` separated path
fn file_name(file_path: &str) -> &str {
    file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path)
}

/// Display title of a document.
///
/// 1. the title rule's capture on the first line, if the rule matches
/// 2. the first line without its markers, if that line is a heading
/// 3. the file name
pub fn document_title(file_path: &str, content: &str, rule: Option<&TitleRule>) -> String {
    let title_line = first_line(content).trim_end_matches('\r');
    if let Some(title) = rule.and_then(|rule| rule.capture(title_line)) {
        return title.to_string();
    }
    if is_heading(title_line) {
        let title = strip_heading_marker(title_line.trim_start());
        if !title.is_empty() {
            return title.to_string();
        }
    }
    file_name(file_path).to_string()
}

/// Markdown link `[title](file_path)` to the given document.
///
/// # Example
/// ```
/// use mdide_parser::markdown_link;
///
/// let link = markdown_link("notes/guide.md", "# User Guide\n\nbody", None);
/// assert_eq!(link, "[User Guide](notes/guide.md)");
/// ```
pub fn markdown_link(file_path: &str, content: &str, rule: Option<&TitleRule>) -> String {
    format!("[{}]({})", document_title(file_path, content, rule), file_path)
}

/// Image tag `![name](file_path)`, named after the file without extension
pub fn image_link(file_path: &str) -> String {
    let name = file_name(file_path);
    let stem = match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    };
    format!("![{}]({})", stem, file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_heading() {
        assert_eq!(document_title("a.md", "# Alpha\ntext", None), "Alpha");
        assert_eq!(document_title("a.md", "### Deep\r\ntext", None), "Deep");
    }

    #[test]
    fn test_title_falls_back_to_file_name() {
        assert_eq!(document_title("dir/a.md", "no heading", None), "a.md");
        assert_eq!(document_title("dir\\b.md", "", None), "b.md");
        assert_eq!(document_title("c.md", "#\nbody", None), "c.md");
    }

    #[test]
    fn test_title_rule_capture() {
        let rule = TitleRule::new(r"^# (\w+)").unwrap();
        assert_eq!(
            document_title("x.md", "# Amazon Web Services (AWS)", Some(&rule)),
            "Amazon"
        );
    }

    #[test]
    fn test_title_rule_without_match_uses_heading() {
        let rule = TitleRule::new(r"^TITLE: (.*)$").unwrap();
        assert_eq!(document_title("x.md", "# Plain", Some(&rule)), "Plain");
    }

    #[test]
    fn test_markdown_link() {
        assert_eq!(
            markdown_link("../up.md", "# Up There", None),
            "[Up There](../up.md)"
        );
    }

    #[test]
    fn test_image_link() {
        assert_eq!(image_link("img/photo.png"), "![photo](img/photo.png)");
        assert_eq!(image_link("logo.svg"), "![logo](logo.svg)");
        assert_eq!(image_link(".hidden"), "![.hidden](.hidden)");
    }
}
