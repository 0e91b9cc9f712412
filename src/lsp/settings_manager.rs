//! Settings state shared by the LSP handlers.
//!
//! `SettingsManager` holds the workspace root and the merged settings. Both
//! are set during `initialize()` and swapped atomically, so handlers read a
//! consistent snapshot without locking.

use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::WorkspaceSettings;

pub(crate) struct SettingsManager {
    root_path: ArcSwap<Option<PathBuf>>,
    settings: ArcSwap<WorkspaceSettings>,
    /// Replaces the XDG user config when set (`--config`)
    user_config_override: Option<PathBuf>,
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("root_path", &"ArcSwap<Option<PathBuf>>")
            .field("settings", &"ArcSwap<WorkspaceSettings>")
            .field("user_config_override", &self.user_config_override)
            .finish()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SettingsManager {
    /// Create a manager holding the built-in default settings.
    pub(crate) fn new(user_config_override: Option<PathBuf>) -> Self {
        Self {
            root_path: ArcSwap::new(Arc::new(None)),
            settings: ArcSwap::new(Arc::new(WorkspaceSettings::default())),
            user_config_override,
        }
    }

    pub(crate) fn user_config_override(&self) -> Option<&PathBuf> {
        self.user_config_override.as_ref()
    }

    /// Set the workspace root path.
    pub(crate) fn set_root_path(&self, path: Option<PathBuf>) {
        self.root_path.store(Arc::new(path));
    }

    /// Get the current workspace root path.
    pub(crate) fn root_path(&self) -> Arc<Option<PathBuf>> {
        self.root_path.load_full()
    }

    /// Load the current workspace settings.
    pub(crate) fn load_settings(&self) -> Arc<WorkspaceSettings> {
        self.settings.load_full()
    }

    /// Replace the workspace settings.
    pub(crate) fn apply_settings(&self, settings: WorkspaceSettings) {
        self.settings.store(Arc::new(settings));
    }
}
