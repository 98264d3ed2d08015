//! # mdide Parser
//!
//! Character-level engine for markdown links and headings.
//!
//! This crate provides:
//! - Line utilities: line counts, first line, heading marker stripping
//! - Completion classification for the text before a cursor
//! - Link lexing around a cursor column, in bracket-first or paren-first mode
//! - Heading collection with duplicate removal
//! - Link and image tag formatting with optional title rules
//! - Whole-document rewrites: remove links, retarget links, relabel links
//! - Location of phrases and back-links inside a document
//!
//! ## Guarantees
//!
//! Every function is synchronous and pure. Missing delimiters, unbalanced
//! brackets or cursors outside the line produce `None`, never a panic.
//! Rewrites that match nothing hand back the input as `Cow::Borrowed`, so
//! the caller can skip the write with a plain equality check. Columns are
//! zero-based and count `char`s.
//!
//! ## Quick Start
//!
//! ```
//! use mdide_parser::prelude::*;
//!
//! // which completion does the user need?
//! assert_eq!(classify_autocomplete("see [", 5), AutocompleteKind::MarkdownLink);
//!
//! // which file does the link under the cursor point to?
//! let span = extract_link("read [Intro](intro.md) first", 7, LexMode::BracketFirst).unwrap();
//! assert_eq!(span.target, "intro.md");
//! assert!(!is_web_link(&span.target));
//!
//! // intro.md was renamed
//! let text = "[Intro](intro.md) and [Other](other.md)";
//! assert_eq!(
//!     replace_link_target(text, "intro.md", "start.md"),
//!     "[Intro](start.md) and [Other](other.md)"
//! );
//!
//! // other.md was deleted
//! assert_eq!(remove_links_with_target(text, "other.md"), "[Intro](intro.md) and ");
//! ```

pub mod parsers;

pub use parsers::*;

// Re-export core types for consumers (no need to depend on mdide-core separately)
pub use mdide_core::{
    AutocompleteKind, CursorPosition, HeadingSet, LinkKind, LinkSpan, TextRange, TitleRule,
};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use mdide_core::{
        AutocompleteKind, CursorPosition, HeadingSet, LinkKind, LinkSpan, TextRange, TitleRule,
    };

    pub use crate::parsers::{
        LexMode, TitleReplacer, classify_autocomplete, classify_target, document_title,
        extract_link, extract_link_bracket_first, extract_link_paren_first, first_line,
        heading_completion_label, headings_in_text, headings_in_texts, image_link, is_heading,
        is_web_link, line_count, locate_link_with_target, locate_phrase, markdown_link,
        remove_links_with_target, replace_link_target, replace_title_phrase,
        strip_heading_marker,
    };
}
