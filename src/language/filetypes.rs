use crate::config::WorkspaceSettings;
use crate::error::LockResultExt;
use std::collections::HashMap;
use std::sync::RwLock;

/// Resolves file extensions to language identifiers
pub struct FiletypeResolver {
    filetype_map: RwLock<HashMap<String, String>>,
}

impl FiletypeResolver {
    pub fn new() -> Self {
        Self {
            filetype_map: RwLock::new(HashMap::new()),
        }
    }

    /// Rebuild the map from the `filetypes` of every configured language
    pub fn build_from_settings(&self, settings: &WorkspaceSettings) {
        let map = settings
            .languages
            .iter()
            .flat_map(|(language, config)| {
                config
                    .filetypes
                    .iter()
                    .map(move |ext| (ext.clone(), language.clone()))
            })
            .collect();
        self.set_filetype_map(map);
    }

    /// Set the filetype map directly
    pub fn set_filetype_map(&self, map: HashMap<String, String>) {
        *self
            .filetype_map
            .write()
            .recover_poison("filetype_resolver::set_filetype_map") = map;
    }

    /// Get language for a document path (URI path or file path)
    pub fn get_language_for_path(&self, path: &str) -> Option<String> {
        let extension = Self::extract_extension(path)?;
        self.get_language_for_extension(extension)
    }

    /// Get language for a file extension
    pub fn get_language_for_extension(&self, extension: &str) -> Option<String> {
        self.filetype_map
            .read()
            .recover_poison("filetype_resolver::get_language_for_extension")
            .get(extension)
            .cloned()
    }

    /// Resolve the language of a document: the path's extension first, then
    /// the `languageId` the client sent.
    pub fn resolve(&self, path: &str, language_id: Option<&str>) -> Option<String> {
        self.get_language_for_path(path)
            .or_else(|| language_id.map(str::to_string))
    }

    /// Add a single filetype mapping
    pub fn add_mapping(&self, extension: String, language: String) {
        self.filetype_map
            .write()
            .recover_poison("filetype_resolver::add_mapping")
            .insert(extension, language);
    }

    /// Extract the file extension from the last path segment
    fn extract_extension(path: &str) -> Option<&str> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl Default for FiletypeResolver {
    fn default() -> Self {
        Self::new()
    }
}
