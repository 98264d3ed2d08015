//! # mdide
//!
//! Command-line front end for the mdide host layer. Each subcommand plays
//! the part of one editor event against a knowledge base on disk and prints
//! its result as JSON on stdout.
//!
//! ```text
//! mdide -w ~/kb complete notes/today.md 4 7
//! mdide -w ~/kb follow notes/today.md 4 12 --paren
//! mdide -w ~/kb rename notes/old.md archive/old.md
//! mdide -w ~/kb delete drafts/unused.md --dry-run
//! mdide -w ~/kb retitle notes/guide.md "User Handbook"
//! ```

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Command, LogFormat};
pub use commands::{ChangeReport, NO_LINK_FOUND, run};
