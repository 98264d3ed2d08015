//! Workspace enumeration: markdown documents and images.
//!
//! Both listings are freshly produced, sorted by relative path, and skip
//! hidden entries plus the configured ignore list. Document contents load
//! lazily on first access.

use mdide_core::{Error, Result, WorkspaceSettings};
use std::path::{Component, Path, PathBuf};
use tokio::sync::OnceCell;
use walkdir::{DirEntry, WalkDir};

/// A markdown document inside the workspace
#[derive(Debug)]
pub struct WorkspaceFile {
    relative_path: PathBuf,
    absolute_path: PathBuf,
    content: OnceCell<String>,
}

impl WorkspaceFile {
    /// Create a file entry for a path below `root`
    pub fn new(root: &Path, relative_path: impl Into<PathBuf>) -> Self {
        let relative_path = relative_path.into();
        Self {
            absolute_path: root.join(&relative_path),
            relative_path,
            content: OnceCell::new(),
        }
    }

    /// Path relative to the workspace root
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Absolute path on disk
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Directory containing the file
    pub fn dir(&self) -> &Path {
        self.absolute_path.parent().unwrap_or(&self.absolute_path)
    }

    /// Full text of the file, read from disk on first call
    pub async fn content(&self) -> Result<&str> {
        self.content
            .get_or_try_init(|| async {
                tokio::fs::read_to_string(&self.absolute_path)
                    .await
                    .map_err(Error::io)
            })
            .await
            .map(String::as_str)
    }
}

fn is_visible(entry: &DirEntry, settings: &WorkspaceSettings) -> bool {
    // the root may itself live in a hidden directory (e.g. /tmp/.tmpXXXX)
    entry.depth() == 0
        || entry
            .file_name()
            .to_str()
            .is_some_and(|name| !settings.is_ignored(name))
}

/// Relative paths of all files below the root accepted by `keep`
fn walk(settings: &WorkspaceSettings, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(&settings.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| is_visible(entry, settings));
    for entry in walker {
        let entry = entry.map_err(|e| Error::io(e.into()))?;
        if !entry.file_type().is_file() || !keep(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(&settings.root) {
            paths.push(relative.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Whether the path names a markdown document
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// All markdown documents of the workspace
pub fn markdown_files(settings: &WorkspaceSettings) -> Result<Vec<WorkspaceFile>> {
    let files = walk(settings, is_markdown)?
        .into_iter()
        .map(|relative| WorkspaceFile::new(&settings.root, relative))
        .collect();
    Ok(files)
}

/// Relative paths of all images in the workspace
pub fn image_files(settings: &WorkspaceSettings) -> Result<Vec<PathBuf>> {
    walk(settings, |path| settings.is_image(path))
}

/// Lexically resolve `.` and `..` components
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Render a path as a link target, always with `/` separators
pub fn link_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Link target leading from documents in `from_dir` to `to`
pub fn relative_link(from_dir: &Path, to: &Path) -> Option<String> {
    pathdiff::diff_paths(to, from_dir).map(|diff| link_path(&diff))
}
