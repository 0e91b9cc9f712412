use std::sync::Arc;

use tree_sitter::Tree;

use crate::syntax::SyntaxTree;
use crate::text::TextDocument;

/// One open document: its current text plus the latest trees parsed for it.
///
/// The trees may lag behind the text while a reparse is in flight. Each
/// `SyntaxTree` records the revision it was built from so readers can tell.
pub struct Document {
    text: Arc<TextDocument>,
    language_id: Option<String>,
    /// Source for incremental reparsing
    tree: Option<Tree>,
    syntax: Option<Arc<SyntaxTree>>,
}

impl Document {
    pub fn new(text: TextDocument, language_id: Option<String>) -> Self {
        Self {
            text: Arc::new(text),
            language_id,
            tree: None,
            syntax: None,
        }
    }

    /// Get the text snapshot
    pub fn text(&self) -> &Arc<TextDocument> {
        &self.text
    }

    pub fn revision(&self) -> i32 {
        self.text.revision()
    }

    /// Get the language ID
    pub fn language_id(&self) -> Option<&str> {
        self.language_id.as_deref()
    }

    /// Get the tree-sitter tree
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Get the converted syntax tree
    pub fn syntax(&self) -> Option<&Arc<SyntaxTree>> {
        self.syntax.as_ref()
    }

    /// Replace the text. The trees stay until a reparse supersedes them.
    pub fn update_text(&mut self, text: TextDocument) {
        self.text = Arc::new(text);
    }

    /// Store trees parsed from the current revision
    pub fn set_trees(&mut self, tree: Tree, syntax: SyntaxTree) {
        self.tree = Some(tree);
        self.syntax = Some(Arc::new(syntax));
    }

    /// Drop both trees
    pub fn clear_trees(&mut self) {
        self.tree = None;
        self.syntax = None;
    }
}
