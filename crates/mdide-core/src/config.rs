//! Configuration types: the `tikibase.json` file, the title-extraction rule
//! and the settings of a workspace.
//!
//! Follows a builder pattern for workspace settings with validation.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file
pub const CONFIG_FILE_NAME: &str = "tikibase.json";

/// Directory names never descended into when enumerating a workspace
pub const DEFAULT_IGNORED_DIRS: [&str; 3] = [".git", "node_modules", "vendor"];

/// File extensions (lowercase, without dot) treated as images
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp"];

/// Contents of a `tikibase.json` file.
///
/// Only the keys mdide understands are modelled, other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikibaseConfig {
    /// Allowed section headings, including their `#` markers
    #[serde(default)]
    pub sections: Option<Vec<String>>,
    /// Regular expression extracting a document title from its first line
    #[serde(default, alias = "titleRegex")]
    pub title_reg_exp: Option<String>,
}

impl TikibaseConfig {
    /// Parse the JSON content of a configuration file
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::parse_error(format!("Invalid {}: {}", CONFIG_FILE_NAME, e)))
    }

    /// Compile the configured title rule, if any
    pub fn title_rule(&self) -> Result<Option<TitleRule>> {
        self.title_reg_exp
            .as_deref()
            .map(TitleRule::new)
            .transpose()
    }
}

/// Extracts the display title of a document from its first line.
///
/// The title is the first capture group, or the whole match for patterns
/// without groups.
#[derive(Debug, Clone)]
pub struct TitleRule {
    regex: Regex,
}

impl TitleRule {
    /// Compile a title rule
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            Error::config_error(format!("Invalid title pattern '{}': {}", pattern, e))
        })?;
        Ok(Self { regex })
    }

    /// Title captured from the given line, if the rule matches
    pub fn capture<'t>(&self, line: &'t str) -> Option<&'t str> {
        let caps = self.regex.captures(line)?;
        caps.get(1).or_else(|| caps.get(0)).map(|m| m.as_str())
    }

    /// Source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Ancestor directories of a directory, starting with the directory itself.
///
/// Stops once the path is down to two components (`/home` on Unix), so the
/// filesystem root is never visited. Clone the iterator to restart it.
#[derive(Debug, Clone)]
pub struct ParentDirs {
    next: Option<PathBuf>,
}

impl Iterator for ParentDirs {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let current = self.next.take()?;
        if current.components().count() > 2 {
            self.next = current.parent().map(Path::to_path_buf);
        }
        Some(current)
    }
}

/// Iterate over `dir` and its ancestors, see [`ParentDirs`]
pub fn parent_dirs(dir: impl Into<PathBuf>) -> ParentDirs {
    ParentDirs {
        next: Some(dir.into()),
    }
}

/// Settings of a single workspace (knowledge base root)
#[derive(Debug, Clone)]
pub struct WorkspaceSettings {
    /// Root directory of the knowledge base
    pub root: PathBuf,
    /// Directory names skipped during enumeration
    pub ignored_dirs: Vec<String>,
    /// Lowercase image extensions
    pub image_extensions: Vec<String>,
    /// Title rule for generated link labels
    pub title_rule: Option<TitleRule>,
}

impl WorkspaceSettings {
    /// Create workspace settings with builder
    pub fn builder(root: impl Into<PathBuf>) -> WorkspaceSettingsBuilder {
        WorkspaceSettingsBuilder::new(root)
    }

    /// Validate the workspace settings
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(Error::config_error(format!(
                "Workspace path does not exist: {}",
                self.root.display()
            )));
        }

        if !self.root.is_dir() {
            return Err(Error::config_error(format!(
                "Workspace path is not a directory: {}",
                self.root.display()
            )));
        }

        Ok(())
    }

    /// Whether a file or directory name is excluded from enumeration
    pub fn is_ignored(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Whether the path has an image extension
    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.image_extensions.iter().any(|known| *known == ext)
            })
    }
}

/// Builder for WorkspaceSettings
pub struct WorkspaceSettingsBuilder {
    root: PathBuf,
    ignored_dirs: Vec<String>,
    image_extensions: Vec<String>,
    title_rule: Option<TitleRule>,
}

impl WorkspaceSettingsBuilder {
    /// Create a new builder with the default ignore list and image types
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            title_rule: None,
        }
    }

    /// Skip an additional directory name
    pub fn ignore(mut self, dir: impl Into<String>) -> Self {
        self.ignored_dirs.push(dir.into());
        self
    }

    /// Replace the recognized image extensions
    pub fn image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions
            .into_iter()
            .map(|e| e.into().to_lowercase())
            .collect();
        self
    }

    /// Set the title rule
    pub fn title_rule(mut self, rule: Option<TitleRule>) -> Self {
        self.title_rule = rule;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<WorkspaceSettings> {
        let settings = WorkspaceSettings {
            root: self.root,
            ignored_dirs: self.ignored_dirs,
            image_extensions: self.image_extensions,
            title_rule: self.title_rule,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_tikibase_config() {
        let config = TikibaseConfig::from_json(
            r##"{"sections": ["# What is it", "# Links"], "titleRegExp": "^# (.*)$", "other": 1}"##,
        )
        .unwrap();
        assert_eq!(
            config.sections,
            Some(vec!["# What is it".to_string(), "# Links".to_string()])
        );
        assert_eq!(config.title_reg_exp.as_deref(), Some("^# (.*)$"));
    }

    #[test]
    fn test_parse_tikibase_config_alias_and_empty() {
        let config = TikibaseConfig::from_json(r#"{"titleRegex": "x"}"#).unwrap();
        assert_eq!(config.title_reg_exp.as_deref(), Some("x"));
        assert_eq!(config.sections, None);

        let empty = TikibaseConfig::from_json("{}").unwrap();
        assert_eq!(empty, TikibaseConfig::default());
    }

    #[test]
    fn test_parse_tikibase_config_invalid() {
        assert!(matches!(
            TikibaseConfig::from_json("not json"),
            Err(Error::ParseError { .. })
        ));
    }

    #[test]
    fn test_title_rule_capture() {
        let rule = TitleRule::new(r"^#+ (.*)$").unwrap();
        assert_eq!(rule.capture("# My Title"), Some("My Title"));
        assert_eq!(rule.capture("no heading"), None);

        let whole = TitleRule::new(r"[A-Z]\w+").unwrap();
        assert_eq!(whole.capture("# about Rust"), Some("Rust"));
    }

    #[test]
    fn test_title_rule_invalid_pattern() {
        let err = TitleRule::new("(unclosed").unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));

        let config = TikibaseConfig {
            title_reg_exp: Some("[".to_string()),
            ..Default::default()
        };
        assert!(config.title_rule().is_err());
    }

    #[test]
    fn test_parent_dirs_stops_at_two_components() {
        let dirs: Vec<PathBuf> = parent_dirs("/home/user/notes/sub").collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/home/user/notes/sub"),
                PathBuf::from("/home/user/notes"),
                PathBuf::from("/home/user"),
                PathBuf::from("/home"),
            ]
        );
    }

    #[test]
    fn test_parent_dirs_short_paths() {
        let dirs: Vec<PathBuf> = parent_dirs("/home").collect();
        assert_eq!(dirs, vec![PathBuf::from("/home")]);

        let relative: Vec<PathBuf> = parent_dirs("a/b/c").collect();
        assert_eq!(relative, vec![PathBuf::from("a/b/c"), PathBuf::from("a/b")]);
    }

    #[test]
    fn test_parent_dirs_restartable() {
        let dirs = parent_dirs("/x/y/z");
        let first: Vec<_> = dirs.clone().collect();
        let second: Vec<_> = dirs.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_workspace_settings_builder() {
        let temp = TempDir::new().unwrap();
        let settings = WorkspaceSettings::builder(temp.path())
            .ignore("drafts")
            .build()
            .unwrap();

        assert!(settings.is_ignored(".git"));
        assert!(settings.is_ignored(".hidden"));
        assert!(settings.is_ignored("node_modules"));
        assert!(settings.is_ignored("drafts"));
        assert!(!settings.is_ignored("notes"));
        assert!(settings.is_image(Path::new("img/photo.PNG")));
        assert!(!settings.is_image(Path::new("doc.md")));
    }

    #[test]
    fn test_workspace_settings_validation() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(WorkspaceSettings::builder(&missing).build().is_err());

        let file = temp.path().join("file.md");
        std::fs::write(&file, "# File").unwrap();
        assert!(WorkspaceSettings::builder(&file).build().is_err());
    }
}
