//! Translation of Tikibase linter output into diagnostics.
//!
//! The linter itself runs outside this crate. Its output is either a JSON
//! array of messages or one JSON message per line.

use mdide_core::{Error, Result, TextRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single finding reported by the linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintMessage {
    /// Path relative to the workspace root
    pub file: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A problem to show at a range of a workspace file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub range: TextRange,
    pub message: String,
    pub severity: Severity,
}

/// Parse linter output.
///
/// Blank output means no findings.
pub fn parse_lint_output(output: &str) -> Result<Vec<LintMessage>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| Error::parse_error(format!("Invalid linter output: {}", e)));
    }
    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| {
                Error::parse_error(format!("Invalid linter message {}: {}", idx + 1, e))
            })
        })
        .collect()
}

/// Convert linter messages into error diagnostics with absolute paths
pub fn to_diagnostics(root: &Path, messages: &[LintMessage]) -> Vec<Diagnostic> {
    messages
        .iter()
        .map(|message| Diagnostic {
            path: root.join(&message.file),
            range: TextRange::on_line(message.line, message.start, message.end),
            message: message.text.clone(),
            severity: Severity::Error,
        })
        .collect()
}

/// Group diagnostics per file, keeping every diagnostic of a file
pub fn diagnostics_by_file(diagnostics: Vec<Diagnostic>) -> BTreeMap<PathBuf, Vec<Diagnostic>> {
    let mut grouped: BTreeMap<PathBuf, Vec<Diagnostic>> = BTreeMap::new();
    for diagnostic in diagnostics {
        grouped
            .entry(diagnostic.path.clone())
            .or_default()
            .push(diagnostic);
    }
    grouped
}
