use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::selection::{SiblingGroup, SiblingGroups};
use crate::syntax::{KindMap, SyntaxKind};

/// Per-language configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    /// File extensions (without the dot) handled by this language
    #[serde(default)]
    pub filetypes: Vec<String>,
    /// Grammar node name -> kind used by the expander
    #[serde(default)]
    pub kinds: HashMap<String, SyntaxKind>,
}

/// Settings accepted from config files and `initializationOptions`
///
/// Every field is optional so partial settings from several sources can be
/// layered with [`merge_settings`](super::merge_settings).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSettings {
    #[serde(default)]
    pub languages: HashMap<String, LanguageConfig>,
    /// Replaces the built-in sibling-group table when present
    pub sibling_groups: Option<Vec<SiblingGroup>>,
    /// Expand over trees that contain parse errors instead of failing
    pub allow_error_trees: Option<bool>,
}

/// Settings after merging, with every default filled in
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceSettings {
    pub languages: HashMap<String, LanguageConfig>,
    pub sibling_groups: SiblingGroups,
    pub allow_error_trees: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        WorkspaceSettings::from(super::defaults::default_settings())
    }
}

impl WorkspaceSettings {
    /// Kind map for `language`, empty when the language is not configured.
    pub fn kind_map(&self, language: &str) -> KindMap {
        self.languages
            .get(language)
            .map(|config| KindMap::new(config.kinds.clone()))
            .unwrap_or_default()
    }
}

impl From<SelectionSettings> for WorkspaceSettings {
    fn from(settings: SelectionSettings) -> Self {
        let sibling_groups = settings
            .sibling_groups
            .map(SiblingGroups::new)
            .unwrap_or_default();

        WorkspaceSettings {
            languages: settings.languages,
            sibling_groups,
            allow_error_trees: settings.allow_error_trees.unwrap_or(false),
        }
    }
}
