//! Execution of CLI commands against a workspace on disk

use anyhow::{Context, Result, bail};
use mdide_vault::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::cli::{Cli, Command};

/// Message shown when bracket-first lexing finds nothing
pub const NO_LINK_FOUND: &str = "No link found";

/// Result of a change command
#[derive(Debug, Serialize)]
pub struct ChangeReport {
    /// Whether files on disk were modified
    pub applied: bool,
    #[serde(flatten)]
    pub edit: WorkspaceEdit,
}

/// Run a parsed command line and produce its JSON result
#[instrument(skip(cli), fields(workspace = ?cli.workspace), name = "mdide_run")]
pub async fn run(cli: Cli) -> Result<Value> {
    let workspace = Workspace::open(&cli.workspace)
        .await
        .with_context(|| format!("Cannot open workspace {}", cli.workspace.display()))?;

    match cli.command {
        Command::Complete { file, line, column } => {
            let line_text = line_at(&workspace, &file, line).await?;
            let items = workspace
                .completions(&file, CursorPosition::new(line, column), &line_text)
                .await?;
            to_json(&items)
        }
        Command::Follow {
            file,
            line,
            column,
            paren,
        } => {
            let mode = if paren {
                LexMode::ParenFirst
            } else {
                LexMode::BracketFirst
            };
            let line_text = line_at(&workspace, &file, line).await?;
            let outcome = workspace
                .follow_link(&file, CursorPosition::new(line, column), &line_text, mode)
                .await?;
            if outcome == FollowOutcome::NoLinkFound {
                eprintln!("{}", NO_LINK_FOUND);
            }
            to_json(&outcome)
        }
        Command::Rename { from, to, dry_run } => rename(&workspace, &from, &to, dry_run).await,
        Command::Delete { paths, dry_run } => delete(&workspace, &paths, dry_run).await,
        Command::Retitle {
            file,
            title,
            dry_run,
        } => {
            let edit = workspace.rename_title(&file, &title).await?;
            finish(edit, dry_run).await
        }
        Command::Headings => to_json(&workspace.headings().await?),
        Command::Lint { output } => {
            let text = tokio::fs::read_to_string(&output)
                .await
                .with_context(|| format!("Cannot read linter output {}", output.display()))?;
            let messages = parse_lint_output(&text)?;
            let diagnostics = to_diagnostics(workspace.root(), &messages);
            to_json(&diagnostics_by_file(diagnostics))
        }
    }
}

/// Move a file and update links to it in one batch
async fn rename(workspace: &Workspace, from: &Path, to: &Path, dry_run: bool) -> Result<Value> {
    let source = workspace.resolve(from)?;
    let destination = workspace.resolve(to)?;
    let mut edit = workspace
        .files_renamed(&[(from.to_path_buf(), to.to_path_buf())])
        .await?;
    edit.move_file(source, destination);
    finish(edit, dry_run).await
}

/// Delete files and remove links to them in one batch
async fn delete(workspace: &Workspace, paths: &[PathBuf], dry_run: bool) -> Result<Value> {
    let mut edit = workspace.files_deleted(paths).await?;
    for path in paths {
        edit.delete_file(workspace.resolve(path)?);
    }
    finish(edit, dry_run).await
}

async fn finish(edit: WorkspaceEdit, dry_run: bool) -> Result<Value> {
    if !dry_run {
        edit.apply().await?;
    }
    to_json(&ChangeReport {
        applied: !dry_run && !edit.is_empty(),
        edit,
    })
}

/// Text of a zero-based line of a workspace document
async fn line_at(workspace: &Workspace, file: &Path, line: usize) -> Result<String> {
    let path = workspace.resolve(file)?;
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    match content.split('\n').nth(line) {
        Some(text) => Ok(text.trim_end_matches('\r').to_string()),
        None => bail!("{} has no line {}", file.display(), line),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
