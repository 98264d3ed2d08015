//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mdide - link maintenance for markdown knowledge bases
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the knowledge base
    #[arg(short, long, env = "MDIDE_WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,

    /// Log output format, written to stderr
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List completions for a cursor position
    Complete {
        /// Document containing the cursor
        file: PathBuf,
        /// Zero-based line of the cursor
        line: usize,
        /// Zero-based column of the cursor
        column: usize,
    },

    /// Follow the link at a cursor position
    Follow {
        file: PathBuf,
        line: usize,
        column: usize,
        /// Start at the `(` of the link instead of the `[`
        #[arg(long)]
        paren: bool,
    },

    /// Rename a file and update links pointing to it
    Rename {
        from: PathBuf,
        to: PathBuf,
        /// Print the edits without touching any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete files and remove links pointing to them
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },

    /// Change the title of a document and relabel links to it
    Retitle {
        file: PathBuf,
        title: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// List the distinct headings of all documents
    Headings,

    /// Convert Tikibase linter output into diagnostics
    Lint {
        /// File with the linter's JSON output
        output: PathBuf,
    },
}
