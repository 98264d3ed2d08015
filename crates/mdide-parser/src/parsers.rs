//! Text engine components.
//!
//! Each module is a set of pure functions over in-memory strings. None of
//! them performs I/O, logs, or keeps state between calls.

pub mod autocomplete;
pub mod headings;
pub mod line;
pub mod link_format;
pub mod link_lexer;
pub mod link_utils;
pub mod locate;
pub mod rewrite;

pub use self::autocomplete::classify_autocomplete;
pub use self::headings::{heading_completion_label, headings_in_text, headings_in_texts, is_heading};
pub use self::line::{first_line, line_count, strip_heading_marker};
pub use self::link_format::{document_title, image_link, markdown_link};
pub use self::link_lexer::{
    LexMode, extract_link, extract_link_bracket_first, extract_link_paren_first,
    find_char_after, find_char_before,
};
pub use self::link_utils::{classify_target, is_web_link};
pub use self::locate::{locate_link_with_target, locate_phrase};
pub use self::rewrite::{
    TitleReplacer, remove_links_with_target, replace_link_target, replace_title_phrase,
};
