//! Shared utilities for link classification.
//!
//! Web links take priority over local files when following a link: a web
//! target is always opened externally and never resolved as a path.

use mdide_core::LinkKind;

/// Whether the target is an `http://` or `https://` URL.
///
/// # Examples
///
/// ```
/// use mdide_parser::is_web_link;
///
/// assert!(is_web_link("https://x.com"));
/// assert!(!is_web_link("../other.md"));
/// ```
pub fn is_web_link(target: &str) -> bool {
    target.starts_with("https://") || target.starts_with("http://")
}

/// Classify a link target into the appropriate `LinkKind`.
///
/// # Examples
///
/// ```
/// use mdide_parser::classify_target;
/// use mdide_core::LinkKind;
///
/// assert_eq!(classify_target("http://example.com"), LinkKind::Web);
/// assert_eq!(classify_target("notes/guide.md"), LinkKind::LocalFile);
/// ```
pub fn classify_target(target: &str) -> LinkKind {
    if is_web_link(target) {
        LinkKind::Web
    } else {
        LinkKind::LocalFile
    }
}
