pub mod defaults;
pub mod settings;
pub mod user;

pub use settings::{LanguageConfig, SelectionSettings, WorkspaceSettings};
use std::collections::HashMap;
pub use user::{
    CONFIG_FILE_NAME, load_config_file, load_user_config, load_workspace_config,
    user_config_path,
};

/// Merge multiple settings in order.
/// Later entries have higher precedence (override earlier ones).
/// Use this for layered config: `merge_all(&[defaults, user, workspace, client])`
pub fn merge_all(configs: &[Option<SelectionSettings>]) -> Option<SelectionSettings> {
    configs.iter().cloned().reduce(merge_settings).flatten()
}

/// Merge two settings, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<SelectionSettings>,
    primary: Option<SelectionSettings>,
) -> Option<SelectionSettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(SelectionSettings {
            languages: merge_languages(fallback.languages, primary.languages),
            // The group table is replaced wholesale, never merged rule by rule
            sibling_groups: primary.sibling_groups.or(fallback.sibling_groups),
            allow_error_trees: primary.allow_error_trees.or(fallback.allow_error_trees),
        }),
    }
}

fn merge_languages(
    mut fallback: HashMap<String, LanguageConfig>,
    primary: HashMap<String, LanguageConfig>,
) -> HashMap<String, LanguageConfig> {
    for (key, primary_config) in primary {
        fallback
            .entry(key)
            .and_modify(|fallback_config| {
                if !primary_config.filetypes.is_empty() {
                    fallback_config.filetypes = primary_config.filetypes.clone();
                }
                for (name, kind) in &primary_config.kinds {
                    fallback_config.kinds.insert(name.clone(), *kind);
                }
            })
            .or_insert(primary_config);
    }
    fallback
}
