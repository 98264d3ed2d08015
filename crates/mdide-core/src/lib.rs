//! # mdide Core
//!
//! Shared value types, error types and configuration for the mdide crates.
//! The text engine (`mdide-parser`) and the workspace host (`mdide-vault`)
//! both build on the types defined here.
//!
//! ## Architecture Principles
//!
//! - **Value types only**: positions, spans and sets never reference a live
//!   document or editor
//! - **Absence over errors**: the engine answers "not found" with `Option`,
//!   [`Error`] is reserved for I/O and configuration
//! - **Explicit configuration**: title rules and section lists are passed in
//!   by the caller, never read from ambient state
//!
//! ## Core Modules
//!
//! - [`models`] - Positions, link spans, completion kinds, heading sets
//! - [`error`] - Error type and Result alias
//! - [`config`] - `tikibase.json`, title rules, workspace settings
//!
//! ## Usage Examples
//!
//! ```
//! use mdide_core::prelude::*;
//!
//! let rule = TitleRule::new(r"^# (.*)$")?;
//! assert_eq!(rule.capture("# Guide"), Some("Guide"));
//!
//! let dirs: Vec<_> = parent_dirs("/home/me/notes").collect();
//! assert_eq!(dirs.len(), 3);
//! # Ok::<(), mdide_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        CONFIG_FILE_NAME, ParentDirs, TikibaseConfig, TitleRule, WorkspaceSettings, parent_dirs,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        AutocompleteKind, CursorPosition, HeadingSet, LinkKind, LinkSpan, TextRange,
    };
}
