//! Batches of file changes applied as one transaction.
//!
//! Change reactions never touch the disk themselves. They return a
//! [`WorkspaceEdit`] that the caller inspects and then applies, the same way an
//! editor would apply a workspace edit. A batch may also move or delete files;
//! if any step fails, every completed step is undone.

use mdide_core::{CursorPosition, Error, Result, TextRange};
use mdide_parser::line_count;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Replacement of a range of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEdit {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Range being replaced
    pub range: TextRange,
    /// Text inserted in place of the range
    pub new_text: String,
}

impl FileEdit {
    /// Replace the whole of `old_content` with `new_text`.
    ///
    /// The range ends at column 0 of the line past the last one, which
    /// covers the final line whether or not it ends in a newline.
    pub fn replace_document(path: impl Into<PathBuf>, old_content: &str, new_text: String) -> Self {
        Self {
            path: path.into(),
            range: TextRange::new(
                CursorPosition::start(),
                CursorPosition::new(line_count(old_content), 0),
            ),
            new_text,
        }
    }

    /// Whether the edit replaces the entire document
    pub fn is_whole_document(&self) -> bool {
        self.range.start == CursorPosition::start() && self.range.end.column == 0
    }
}

/// A file moved or deleted as part of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FileOperation {
    /// Delete a file
    Delete { path: PathBuf },
    /// Move a file, creating the parent directories of `to`
    Move { from: PathBuf, to: PathBuf },
}

/// File operations followed by document edits, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    /// Run before any document edit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<FileOperation>,
    pub edits: Vec<FileEdit>,
}

/// How to revert one completed step
#[derive(Debug)]
enum Undo {
    /// Put back the previous bytes, or remove a file that did not exist
    Restore {
        path: PathBuf,
        previous: Option<Vec<u8>>,
    },
    /// Move a file from `to` back to `from`
    MoveBack { from: PathBuf, to: PathBuf },
}

impl Undo {
    async fn run(self) -> Result<()> {
        match self {
            Undo::Restore {
                path,
                previous: Some(bytes),
            } => fs::write(&path, bytes).await.map_err(Error::io),
            Undo::Restore {
                path,
                previous: None,
            } => fs::remove_file(&path).await.map_err(Error::io),
            Undo::MoveBack { from, to } => fs::rename(&to, &from).await.map_err(Error::io),
        }
    }
}

impl WorkspaceEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a whole-document replacement
    pub fn replace_document(&mut self, path: impl Into<PathBuf>, old_content: &str, new_text: String) {
        self.edits
            .push(FileEdit::replace_document(path, old_content, new_text));
    }

    /// Queue the deletion of a file
    pub fn delete_file(&mut self, path: impl Into<PathBuf>) {
        self.operations
            .push(FileOperation::Delete { path: path.into() });
    }

    /// Queue moving a file
    pub fn move_file(&mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) {
        self.operations.push(FileOperation::Move {
            from: from.into(),
            to: to.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.edits.is_empty()
    }

    /// Number of file operations and document edits
    pub fn len(&self) -> usize {
        self.operations.len() + self.edits.len()
    }

    /// Paths of the edited documents, in order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.edits.iter().map(|edit| edit.path.as_path())
    }

    /// Run the file operations, then write every document edit.
    ///
    /// Each document is written to a sibling temp file and renamed over the
    /// existing file. Only whole-document edits are supported; a partial range
    /// yields `Error::InvalidPath` before anything is touched. When a step
    /// fails, the completed steps are undone in reverse order and the error
    /// of the failed step is returned.
    pub async fn apply(&self) -> Result<()> {
        if let Some(partial) = self.edits.iter().find(|e| !e.is_whole_document()) {
            return Err(Error::invalid_path(format!(
                "Cannot apply partial edit to {}",
                partial.path.display()
            )));
        }

        let mut journal = Vec::new();
        if let Err(e) = self.execute(&mut journal).await {
            log::warn!("Edit failed, undoing {} completed steps: {}", journal.len(), e);
            for undo in journal.into_iter().rev() {
                if let Err(undo_err) = undo.run().await {
                    log::error!("Undo step failed: {}", undo_err);
                }
            }
            return Err(e);
        }
        log::info!(
            "Applied {} file operations and {} file edits",
            self.operations.len(),
            self.edits.len()
        );
        Ok(())
    }

    async fn execute(&self, journal: &mut Vec<Undo>) -> Result<()> {
        for operation in &self.operations {
            match operation {
                FileOperation::Delete { path } => {
                    let previous = fs::read(path).await.map_err(Error::io)?;
                    fs::remove_file(path).await.map_err(Error::io)?;
                    journal.push(Undo::Restore {
                        path: path.clone(),
                        previous: Some(previous),
                    });
                    log::debug!("Deleted {}", path.display());
                }
                FileOperation::Move { from, to } => {
                    if fs::try_exists(to).await.map_err(Error::io)? {
                        return Err(Error::invalid_path(format!(
                            "Cannot move {}: {} already exists",
                            from.display(),
                            to.display()
                        )));
                    }
                    if let Some(parent) = to.parent() {
                        fs::create_dir_all(parent).await.map_err(Error::io)?;
                    }
                    fs::rename(from, to).await.map_err(Error::io)?;
                    journal.push(Undo::MoveBack {
                        from: from.clone(),
                        to: to.clone(),
                    });
                    log::debug!("Moved {} to {}", from.display(), to.display());
                }
            }
        }

        for edit in &self.edits {
            let previous = match fs::read(&edit.path).await {
                Ok(bytes) => Some(bytes),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(Error::io(e)),
            };
            write_atomic(&edit.path, &edit.new_text).await?;
            journal.push(Undo::Restore {
                path: edit.path.clone(),
                previous,
            });
            log::debug!("Updated {}", edit.path.display());
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, content).await.map_err(Error::io)?;
    if let Err(e) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(Error::io(e));
    }
    Ok(())
}
