//! Lookup of `tikibase.json` files for a workspace and its documents.

use mdide_core::{CONFIG_FILE_NAME, Result, TikibaseConfig, WorkspaceSettings, parent_dirs};
use std::path::Path;

/// Section headings configured for documents in `document_dir`.
///
/// Walks from `document_dir` upward while the directories hold
/// configuration files without sections. A missing, unreadable or invalid
/// file ends the walk: configuration problems mean "no sections
/// configured", never an error.
pub async fn load_configured_sections(document_dir: &Path) -> Option<Vec<String>> {
    for dir in parent_dirs(document_dir) {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let content = match tokio::fs::read_to_string(&config_path).await {
            Ok(content) => content,
            Err(e) => {
                log::debug!("Cannot read {}: {}", config_path.display(), e);
                return None;
            }
        };
        match TikibaseConfig::from_json(&content) {
            Ok(TikibaseConfig {
                sections: Some(sections),
                ..
            }) => return Some(sections),
            Ok(_) => continue,
            Err(e) => {
                log::debug!("Ignoring {}: {}", config_path.display(), e);
                return None;
            }
        }
    }
    None
}

/// Settings for the workspace at `root`, including the title rule from its
/// `tikibase.json` if present.
///
/// Unlike section lookup, an invalid title pattern is reported: it would
/// otherwise silently change every generated link label.
pub async fn load_workspace_settings(root: &Path) -> Result<WorkspaceSettings> {
    let config_path = root.join(CONFIG_FILE_NAME);
    let title_rule = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => TikibaseConfig::from_json(&content)?.title_rule()?,
        Err(e) => {
            log::debug!("No workspace configuration at {}: {}", config_path.display(), e);
            None
        }
    };
    if let Some(rule) = &title_rule {
        log::info!("Using title pattern {}", rule.as_str());
    }
    WorkspaceSettings::builder(root).title_rule(title_rule).build()
}
