use crate::config::{
    SelectionSettings, WorkspaceSettings, defaults::default_settings, load_config_file,
    load_user_config, load_workspace_config, merge_all,
};
use serde_json::Value;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsEventKind {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsEvent {
    pub kind: SettingsEventKind,
    pub message: String,
}

impl SettingsEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: SettingsEventKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: SettingsEventKind::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct SettingsLoadOutcome {
    pub settings: WorkspaceSettings,
    pub events: Vec<SettingsEvent>,
}

/// Build the effective settings from every layer.
///
/// Precedence, lowest first: built-in defaults, user config (or
/// `user_config_override`), `<root>/hirogeru.toml`, `initializationOptions`.
/// A layer that fails to load is skipped with a warning event.
pub fn load_settings(
    user_config_override: Option<&Path>,
    root_path: Option<&Path>,
    initialization_options: Option<Value>,
) -> SettingsLoadOutcome {
    let mut events = Vec::new();

    let defaults = Some(default_settings());
    let user_config = load_user_layer(user_config_override, &mut events);
    let workspace_config = root_path.and_then(|root| load_workspace_layer(root, &mut events));
    let client_settings =
        initialization_options.and_then(|value| parse_initialization_options(value, &mut events));

    let merged = merge_all(&[defaults, user_config, workspace_config, client_settings])
        .unwrap_or_else(default_settings);

    SettingsLoadOutcome {
        settings: WorkspaceSettings::from(merged),
        events,
    }
}

fn load_user_layer(
    user_config_override: Option<&Path>,
    events: &mut Vec<SettingsEvent>,
) -> Option<SelectionSettings> {
    let loaded = match user_config_override {
        Some(path) => load_config_file(path),
        None => load_user_config(),
    };

    match loaded {
        Ok(Some(settings)) => {
            events.push(SettingsEvent::info("Loaded user config"));
            Some(settings)
        }
        Ok(None) => {
            if let Some(path) = user_config_override {
                events.push(SettingsEvent::warning(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            None
        }
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Failed to load user config: {}",
                err
            )));
            None
        }
    }
}

fn load_workspace_layer(root: &Path, events: &mut Vec<SettingsEvent>) -> Option<SelectionSettings> {
    match load_workspace_config(root) {
        Ok(Some(settings)) => {
            events.push(SettingsEvent::info(format!(
                "Loaded workspace config from {}",
                root.display()
            )));
            Some(settings)
        }
        Ok(None) => None,
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Failed to load workspace config: {}",
                err
            )));
            None
        }
    }
}

fn parse_initialization_options(
    value: Value,
    events: &mut Vec<SettingsEvent>,
) -> Option<SelectionSettings> {
    if value.is_null() {
        return None;
    }

    match serde_json::from_value::<SelectionSettings>(value) {
        Ok(settings) => {
            events.push(SettingsEvent::info("Parsed initialization options"));
            Some(settings)
        }
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Failed to parse initialization options: {}",
                err
            )));
            None
        }
    }
}
