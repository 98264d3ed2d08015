//! Value types exchanged between the text engine and its callers.
//!
//! Every type here is a plain value: no type holds on to a document or an
//! editor object. Columns are zero-based and count `char`s, lines are
//! zero-based.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cursor position inside a document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of a document
    pub fn start() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// Range between two positions, exclusive at `end`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: CursorPosition,
    pub end: CursorPosition,
}

impl TextRange {
    /// Create a new range
    pub fn new(start: CursorPosition, end: CursorPosition) -> Self {
        Self { start, end }
    }

    /// Range covering `[start_column, end_column)` of a single line
    pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self {
            start: CursorPosition::new(line, start_column),
            end: CursorPosition::new(line, end_column),
        }
    }

    /// Empty range at the given position
    pub fn at(position: CursorPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The parenthesized target of a markdown link `[label](target)`.
///
/// `start` is the column of `(` and `end` the column of `)`, so the target
/// occupies the half-open column range `start + 1 .. end`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LinkSpan {
    pub start: usize,
    pub end: usize,
    pub target: String,
}

impl LinkSpan {
    /// Column range of the target text itself, without the parentheses
    pub fn target_columns(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end
    }
}

/// The kind of completion needed at a cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutocompleteKind {
    /// Typing `[`: complete a link to a markdown document
    MarkdownLink,
    /// Typing `![`: complete an image tag
    Image,
    /// Typing `#` at the start of a line: complete a section heading
    Heading,
    /// Nothing to complete
    None,
}

/// Where a link points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// `http://` or `https://` URL, opened externally
    Web,
    /// Path relative to the linking document
    LocalFile,
}

/// Distinct raw heading lines of one or more documents, markers included
pub type HeadingSet = BTreeSet<String>;
