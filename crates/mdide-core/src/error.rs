//! Error types for the host side of mdide.
//!
//! The text engine never fails: absence of a result is expressed with
//! `Option` and "nothing changed" with a borrowed `Cow`. Everything that
//! touches the filesystem or user configuration reports through [`Error`].

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The error type for workspace, configuration and CLI operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path outside the workspace or not representable
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// Parse error (linter output, configuration JSON)
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration (bad title regex, missing workspace)
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }
}
