//! Configuration file loading.
//!
//! User-wide config lives at `$XDG_CONFIG_HOME/hirogeru/hirogeru.toml`, falling
//! back to the platform config directory when `XDG_CONFIG_HOME` is unset.
//! Workspace config is `hirogeru.toml` at the workspace root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SelectionSettings;
use crate::error::{ExpandError, ExpandResult};

pub const CONFIG_FILE_NAME: &str = "hirogeru.toml";

/// Returns the path to the user configuration file.
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return Some(PathBuf::from(xdg_config).join("hirogeru").join(CONFIG_FILE_NAME));
    }

    dirs::config_dir().map(|dir| dir.join("hirogeru").join(CONFIG_FILE_NAME))
}

/// Load the user config. A missing file is `Ok(None)`.
pub fn load_user_config() -> ExpandResult<Option<SelectionSettings>> {
    match user_config_path() {
        Some(path) => load_config_file(&path),
        None => Ok(None),
    }
}

/// Load `hirogeru.toml` from a workspace root. A missing file is `Ok(None)`.
pub fn load_workspace_config(root: &Path) -> ExpandResult<Option<SelectionSettings>> {
    load_config_file(&root.join(CONFIG_FILE_NAME))
}

/// Read and parse one TOML config file. A missing file is `Ok(None)`.
pub fn load_config_file(path: &Path) -> ExpandResult<Option<SelectionSettings>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    toml::from_str::<SelectionSettings>(&contents)
        .map(Some)
        .map_err(|err| ExpandError::config(format!("{}: {}", path.display(), err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    #[serial(xdg_env)]
    fn user_config_path_uses_xdg_config_home_when_set() {
        let original = env::var("XDG_CONFIG_HOME").ok();

        // SAFETY: #[serial(xdg_env)] prevents concurrent modification of XDG_CONFIG_HOME
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let path = user_config_path();

        // SAFETY: Same as above - restoring original env state
        unsafe {
            match original {
                Some(val) => env::set_var("XDG_CONFIG_HOME", val),
                None => env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        assert_eq!(
            path,
            Some(PathBuf::from("/custom/config/hirogeru/hirogeru.toml"))
        );
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = load_workspace_config(dir.path()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn workspace_file_is_parsed() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "allowErrorTrees = true\n[languages.java]\nfiletypes = [\"java\"]\n",
        )
        .unwrap();

        let loaded = load_workspace_config(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.allow_error_trees, Some(true));
        assert_eq!(loaded.languages["java"].filetypes, vec!["java"]);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "allowErrorTrees = \"maybe\"").unwrap();

        let result = load_workspace_config(dir.path());
        assert!(matches!(result, Err(ExpandError::Config { .. })));
    }
}
