use tree_sitter::{Parser, Tree};

use super::registry::LanguageRegistry;

/// Creates Tree-sitter parsers configured for registered languages
#[derive(Clone)]
pub struct ParserFactory {
    language_registry: LanguageRegistry,
}

impl ParserFactory {
    pub fn new(language_registry: LanguageRegistry) -> Self {
        Self { language_registry }
    }

    /// Create a new parser for the specified language
    pub fn create_parser(&self, language_id: &str) -> Option<Parser> {
        let language = self.language_registry.get(language_id)?;
        let mut parser = Parser::new();
        match parser.set_language(&language) {
            Ok(()) => Some(parser),
            Err(err) => {
                log::error!(
                    target: "hirogeru::parse",
                    "Grammar for {} is incompatible with this tree-sitter: {}",
                    language_id,
                    err
                );
                None
            }
        }
    }

    /// Parse `text` as `language_id`, reusing `old_tree` when it was edited to match
    pub fn parse(&self, language_id: &str, text: &str, old_tree: Option<&Tree>) -> Option<Tree> {
        let mut parser = self.create_parser(language_id)?;
        let tree = parser.parse(text, old_tree);
        if tree.is_none() {
            log::warn!(target: "hirogeru::parse", "Parser for {} returned no tree", language_id);
        }
        tree
    }
}
