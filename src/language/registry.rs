use crate::error::LockResultExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tree_sitter::Language;

/// Registry for the Tree-sitter languages the server can parse
#[derive(Clone)]
pub struct LanguageRegistry {
    languages: Arc<Mutex<HashMap<String, Language>>>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            languages: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A registry holding the grammars compiled into the binary
    pub fn with_bundled() -> Self {
        let registry = Self::new();
        registry.register("java".to_string(), tree_sitter_java::LANGUAGE.into());
        registry.register("rust".to_string(), tree_sitter_rust::LANGUAGE.into());
        registry
    }

    /// Register a language with the given ID
    pub fn register(&self, language_id: String, language: Language) {
        self.languages
            .lock()
            .recover_poison("registry::register")
            .insert(language_id, language);
    }

    /// Get a language by ID
    pub fn get(&self, language_id: &str) -> Option<Language> {
        self.languages
            .lock()
            .recover_poison("registry::get")
            .get(language_id)
            .cloned()
    }

    /// Check if a language is registered
    pub fn contains(&self, language_id: &str) -> bool {
        self.languages
            .lock()
            .recover_poison("registry::contains")
            .contains_key(language_id)
    }

    /// Get all registered language IDs
    pub fn language_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .languages
            .lock()
            .recover_poison("registry::language_ids")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}
