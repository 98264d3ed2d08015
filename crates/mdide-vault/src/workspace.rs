//! The editor-facing side of a knowledge base.
//!
//! [`Workspace`] answers completion and follow-link requests and turns file
//! renames, file deletions and title changes into [`WorkspaceEdit`]s.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mdide_core::prelude::*;
use mdide_parser::{
    LexMode, classify_target, extract_link, first_line, heading_completion_label,
    headings_in_texts, image_link, locate_link_with_target, locate_phrase, markdown_link, remove_links_with_target,
    replace_link_target, replace_title_phrase, strip_heading_marker,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::{load_configured_sections, load_workspace_settings};
use crate::edit::WorkspaceEdit;
use crate::files::{
    WorkspaceFile, image_files, link_path, markdown_files, normalize_path, relative_link,
};

/// A single completion proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Text inserted after what the user already typed
    pub label: String,
    pub kind: AutocompleteKind,
}

/// What the editor should do after following a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FollowOutcome {
    /// Open a web link in the browser
    OpenExternal { url: String },
    /// Open the document and select the back-reference
    Navigate { path: PathBuf, selection: TextRange },
    /// Open the document, no back-reference was found
    OpenOnly { path: PathBuf },
    /// Bracket-first lexing found no link: tell the user
    NoLinkFound,
    /// Paren-first lexing found no link: do nothing
    Nothing,
}

/// A knowledge base rooted at a directory
#[derive(Debug, Clone)]
pub struct Workspace {
    settings: WorkspaceSettings,
}

impl Workspace {
    /// Open the workspace at `root`, reading its `tikibase.json` if present
    #[instrument(name = "workspace_open")]
    pub async fn open(root: &Path) -> Result<Self> {
        let settings = load_workspace_settings(root).await?;
        Self::new(settings)
    }

    /// Create a workspace from explicit settings.
    ///
    /// The root is made absolute so that every path handed out is absolute.
    pub fn new(mut settings: WorkspaceSettings) -> Result<Self> {
        settings.validate()?;
        let absolute = std::path::absolute(&settings.root).map_err(Error::io)?;
        settings.root = normalize_path(&absolute);
        log::info!("Workspace root: {}", settings.root.display());
        Ok(Self { settings })
    }

    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    /// Absolute path for a path given relative to the root or absolute.
    ///
    /// Fails with `Error::InvalidPath` for paths outside the workspace.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let resolved = normalize_path(&self.settings.root.join(path));
        if !resolved.starts_with(&self.settings.root) {
            return Err(Error::invalid_path(format!(
                "Path outside workspace: {}",
                path.display()
            )));
        }
        Ok(resolved)
    }

    /// All markdown documents, freshly enumerated
    pub fn markdown_files(&self) -> Result<Vec<WorkspaceFile>> {
        markdown_files(&self.settings)
    }

    /// Completion proposals for the cursor `position` in `document`.
    ///
    /// `line_text` is the content of the cursor line. The title line
    /// (line 0) never gets completions.
    #[instrument(skip(self, line_text), name = "workspace_completions")]
    pub async fn completions(
        &self,
        document: &Path,
        position: CursorPosition,
        line_text: &str,
    ) -> Result<Vec<CompletionItem>> {
        if position.line == 0 {
            return Ok(Vec::new());
        }
        let started = Instant::now();
        let document = self.resolve(document)?;
        let document_dir = document.parent().unwrap_or(self.root());

        let kind = mdide_parser::classify_autocomplete(line_text, position.column);
        let labels = match kind {
            AutocompleteKind::MarkdownLink => self.link_labels(document_dir).await?,
            AutocompleteKind::Image => self.image_labels(document_dir)?,
            AutocompleteKind::Heading => self.heading_labels(document_dir).await?,
            AutocompleteKind::None => Vec::new(),
        };
        log::debug!(
            "{} {:?} completions created in {}ms",
            labels.len(),
            kind,
            started.elapsed().as_millis()
        );
        Ok(labels
            .into_iter()
            .map(|label| CompletionItem { label, kind })
            .collect())
    }

    async fn link_labels(&self, document_dir: &Path) -> Result<Vec<String>> {
        let rule = self.settings.title_rule.as_ref();
        let mut labels = Vec::new();
        for file in self.markdown_files()? {
            let target = self.link_target(document_dir, &file);
            let link = markdown_link(&target, file.content().await?, rule);
            labels.push(without_typed_prefix(&link, '['));
        }
        Ok(labels)
    }

    fn image_labels(&self, document_dir: &Path) -> Result<Vec<String>> {
        let labels = image_files(&self.settings)?
            .into_iter()
            .map(|relative| {
                let target = relative_link(document_dir, &self.root().join(&relative))
                    .unwrap_or_else(|| link_path(&relative));
                without_typed_prefix(&image_link(&target), '!')
            })
            .collect();
        Ok(labels)
    }

    async fn heading_labels(&self, document_dir: &Path) -> Result<Vec<String>> {
        if let Some(sections) = load_configured_sections(document_dir).await {
            log::debug!("Using {} configured sections", sections.len());
            return Ok(sections
                .iter()
                .map(|section| heading_completion_label(section).to_string())
                .collect());
        }
        Ok(self
            .headings()
            .await?
            .iter()
            .map(|heading| heading_completion_label(heading).to_string())
            .collect())
    }

    /// Distinct headings of all documents
    #[instrument(skip(self), name = "workspace_headings")]
    pub async fn headings(&self) -> Result<HeadingSet> {
        let files = self.markdown_files()?;
        let mut texts = Vec::with_capacity(files.len());
        for file in &files {
            texts.push(file.content().await?);
        }
        let headings = headings_in_texts(texts);
        log::debug!("Collected {} headings", headings.len());
        Ok(headings)
    }

    /// Follow the link at the cursor of `document`.
    ///
    /// Local targets resolve against the document's directory. After opening
    /// the target, bracket-first mode looks for a link back to the source
    /// file, paren-first mode for the source file name anywhere in the text.
    #[instrument(skip(self, line_text), name = "workspace_follow_link")]
    pub async fn follow_link(
        &self,
        document: &Path,
        position: CursorPosition,
        line_text: &str,
        mode: LexMode,
    ) -> Result<FollowOutcome> {
        let Some(span) = extract_link(line_text, position.column, mode) else {
            return Ok(match mode {
                LexMode::BracketFirst => FollowOutcome::NoLinkFound,
                LexMode::ParenFirst => FollowOutcome::Nothing,
            });
        };
        if classify_target(&span.target) == LinkKind::Web {
            return Ok(FollowOutcome::OpenExternal { url: span.target });
        }

        let document = self.resolve(document)?;
        let document_dir = document.parent().unwrap_or(self.root());
        let path = normalize_path(&document_dir.join(&span.target));
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| Error::file_not_found(&path))?;

        let source_name = document
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let selection = match mode {
            LexMode::BracketFirst => locate_link_with_target(&content, &source_name).map(TextRange::at),
            LexMode::ParenFirst => locate_phrase(&content, &source_name),
        };
        Ok(match selection {
            Some(selection) => FollowOutcome::Navigate { path, selection },
            None => {
                log::debug!("No reference to {} in {}", source_name, path.display());
                FollowOutcome::OpenOnly { path }
            }
        })
    }

    /// Remove links to the deleted files from every document
    #[instrument(skip(self), name = "workspace_files_deleted")]
    pub async fn files_deleted(&self, deleted: &[PathBuf]) -> Result<WorkspaceEdit> {
        let started = Instant::now();
        let deleted = deleted
            .iter()
            .map(|path| self.resolve(path))
            .collect::<Result<Vec<_>>>()?;

        let mut edit = WorkspaceEdit::new();
        for file in self.markdown_files()? {
            if deleted.iter().any(|path| path == file.absolute_path()) {
                continue;
            }
            let content = file.content().await?;
            let updated = rewrite_each(content, &deleted, |text, deleted_path| {
                match relative_link(file.dir(), deleted_path) {
                    Some(target) => remove_links_with_target(text, &target),
                    None => Cow::Borrowed(text),
                }
            });
            if let Some(updated) = updated {
                edit.replace_document(file.absolute_path(), content, updated);
            }
        }
        log::debug!(
            "Removed links to {} files from {} documents in {}ms",
            deleted.len(),
            edit.len(),
            started.elapsed().as_millis()
        );
        Ok(edit)
    }

    /// Point links to renamed files at their new location.
    ///
    /// Works before or after the files were moved. A renamed document that
    /// is still at its old path gets its edit addressed to the new path, so
    /// the edit applies after a [`WorkspaceEdit::move_file`] of the same pair.
    #[instrument(skip(self), name = "workspace_files_renamed")]
    pub async fn files_renamed(&self, renamed: &[(PathBuf, PathBuf)]) -> Result<WorkspaceEdit> {
        let started = Instant::now();
        let renamed = renamed
            .iter()
            .map(|(old, new)| Ok((self.resolve(old)?, self.resolve(new)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut edit = WorkspaceEdit::new();
        for file in self.markdown_files()? {
            let content = file.content().await?;
            let updated = rewrite_each(content, &renamed, |text, (old, new)| {
                let targets = relative_link(file.dir(), old).zip(relative_link(file.dir(), new));
                match targets {
                    Some((old_target, new_target)) => {
                        replace_link_target(text, &old_target, &new_target)
                    }
                    None => Cow::Borrowed(text),
                }
            });
            if let Some(updated) = updated {
                let path = renamed
                    .iter()
                    .find(|(old, _)| old == file.absolute_path())
                    .map_or(file.absolute_path(), |(_, new)| new.as_path());
                edit.replace_document(path, content, updated);
            }
        }
        log::debug!(
            "Updated link targets in {} documents in {}ms",
            edit.len(),
            started.elapsed().as_millis()
        );
        Ok(edit)
    }

    /// Change the title of `document` to `new_title`.
    ///
    /// Rewrites the document's own title line, keeping its heading marker,
    /// and relabels every link `[old title](document)` in the workspace.
    /// An unchanged title yields an empty edit.
    #[instrument(skip(self), name = "workspace_rename_title")]
    pub async fn rename_title(&self, document: &Path, new_title: &str) -> Result<WorkspaceEdit> {
        let document = self.resolve(document)?;
        let own_content = tokio::fs::read_to_string(&document)
            .await
            .map_err(|_| Error::file_not_found(&document))?;
        let title_line = first_line(&own_content).trim_end_matches('\r');
        let old_title = strip_heading_marker(title_line);
        let mut edit = WorkspaceEdit::new();
        if old_title == new_title {
            log::debug!("Title of {} unchanged", document.display());
            return Ok(edit);
        }
        let marker = &title_line[..title_line.len() - old_title.len()];
        log::info!("Renaming title {:?} to {:?}", old_title, new_title);

        for file in self.markdown_files()? {
            let content = file.content().await?;
            let Some(target) = relative_link(file.dir(), &document) else {
                continue;
            };
            let relabeled = replace_title_phrase(old_title, &target, new_title).apply(content);
            let updated = if file.absolute_path() == document {
                Cow::Owned(replace_first_line(
                    &relabeled,
                    &format!("{}{}", marker, new_title),
                ))
            } else {
                relabeled
            };
            if updated != content {
                edit.replace_document(file.absolute_path(), content, updated.into_owned());
            }
        }
        Ok(edit)
    }

    /// Relative link target from `document_dir` to a workspace file
    fn link_target(&self, document_dir: &Path, file: &WorkspaceFile) -> String {
        relative_link(document_dir, file.absolute_path())
            .unwrap_or_else(|| link_path(file.relative_path()))
    }
}

/// Apply one rewrite per item in turn. Returns the new text only if it
/// differs from `content`.
fn rewrite_each<T, F>(content: &str, items: &[T], mut rewrite: F) -> Option<String>
where
    F: for<'t> FnMut(&'t str, &T) -> Cow<'t, str>,
{
    let mut updated: Option<String> = None;
    for item in items {
        let current = updated.as_deref().unwrap_or(content);
        let rewritten = match rewrite(current, item) {
            Cow::Owned(text) => Some(text),
            Cow::Borrowed(_) => None,
        };
        if rewritten.is_some() {
            updated = rewritten;
        }
    }
    updated.filter(|text| text != content)
}

/// Replace the first line of `text`, keeping a trailing `\r` and the rest
fn replace_first_line(text: &str, new_line: &str) -> String {
    let old_line = first_line(text);
    let rest = &text[old_line.len()..];
    let cr = if old_line.ends_with('\r') { "\r" } else { "" };
    format!("{}{}{}", new_line, cr, rest)
}

/// Completion label for a generated link: the user already typed its first
/// character.
fn without_typed_prefix(link: &str, typed: char) -> String {
    link.strip_prefix(typed).unwrap_or(link).to_string()
}
