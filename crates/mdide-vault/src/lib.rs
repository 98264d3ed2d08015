//! # mdide Vault
//!
//! Host layer around the link engine: everything an editor needs to keep a
//! knowledge base of interlinked markdown documents consistent.
//!
//! This crate provides:
//! - Enumeration of markdown documents and images, with lazy file contents
//! - `tikibase.json` lookup for configured sections and the title rule
//! - Completion proposals for links, images and headings
//! - Link following with back-reference location
//! - Edit batches reacting to deleted files, renamed files and title changes
//! - Translation of linter output into diagnostics
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdide_vault::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let workspace = Workspace::open(Path::new("/path/to/kb")).await?;
//!
//!     // notes/old.md was renamed to notes/new.md
//!     let edit = workspace
//!         .files_renamed(&[(PathBuf::from("notes/old.md"), PathBuf::from("notes/new.md"))])
//!         .await?;
//!     println!("{} documents need updating", edit.len());
//!     edit.apply().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Edits
//!
//! Reactions never write files themselves. They return a [`WorkspaceEdit`]
//! of whole-document replacements. Documents whose rewrite leaves them
//! unchanged are not part of the edit. Callers may add file moves and
//! deletions to the same batch. [`WorkspaceEdit::apply`] writes each file
//! through a temp file and a rename, and undoes every completed step when
//! one fails.
//!
//! ## Error Handling
//!
//! All operations return [`mdide_core::Result<T>`]:
//! - I/O errors while enumerating or reading documents
//! - Paths outside the workspace
//! - Unreadable link targets
//! - Invalid title patterns in the workspace configuration
//!
//! Broken `tikibase.json` files below the root only disable configured
//! sections.

pub mod config;
pub mod edit;
pub mod files;
pub mod lint;
pub mod workspace;

pub use config::{load_configured_sections, load_workspace_settings};
pub use edit::{FileEdit, FileOperation, WorkspaceEdit};
pub use files::{WorkspaceFile, image_files, markdown_files};
pub use lint::{
    Diagnostic, LintMessage, Severity, diagnostics_by_file, parse_lint_output, to_diagnostics,
};
pub use mdide_core::prelude::*;
pub use workspace::{CompletionItem, FollowOutcome, Workspace};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::edit::*;
    pub use crate::files::*;
    pub use crate::lint::*;
    pub use crate::workspace::*;
    pub use mdide_core::prelude::*;
    pub use mdide_parser::LexMode;
}
