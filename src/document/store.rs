use crate::document::Document;
use crate::document::parse::ParsedDocument;
use crate::error::{ExpandError, ExpandResult};
use crate::selection::DocumentSource;
use crate::syntax::{SyntaxModel, SyntaxTree};
use crate::text::TextDocument;
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tree_sitter::{InputEdit, Tree};
use url::Url;

// The central store for all open documents and their trees.
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
    allow_error_trees: AtomicBool,
}

pub struct DocumentHandle<'a> {
    inner: Ref<'a, Url, Document>,
}

impl<'a> DocumentHandle<'a> {
    fn new(inner: Ref<'a, Url, Document>) -> Self {
        Self { inner }
    }
}

impl<'a> Deref for DocumentHandle<'a> {
    type Target = Document;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self {
            documents: DashMap::new(),
            allow_error_trees: AtomicBool::new(false),
        }
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether trees containing parse errors are handed out
    pub fn set_allow_error_trees(&self, allow: bool) {
        self.allow_error_trees.store(allow, Ordering::Relaxed);
    }

    pub fn insert(&self, uri: Url, text: String, revision: i32, language_id: Option<String>) {
        self.documents.insert(
            uri,
            Document::new(TextDocument::new(text, revision), language_id),
        );
    }

    pub fn get(&self, uri: &Url) -> Option<DocumentHandle<'_>> {
        self.documents.get(uri).map(DocumentHandle::new)
    }

    /// Replace the text of an open document. Returns false for unknown documents.
    pub fn update_text(&self, uri: &Url, text: String, revision: i32) -> bool {
        match self.documents.get_mut(uri) {
            Some(mut doc) => {
                doc.update_text(TextDocument::new(text, revision));
                true
            }
            None => false,
        }
    }

    /// Store a parse result if the document is still at the parsed revision.
    ///
    /// A parse that finishes after a newer edit arrived is discarded; returns
    /// whether the result was stored.
    pub fn set_parsed(&self, uri: &Url, parsed: ParsedDocument) -> bool {
        let Some(mut doc) = self.documents.get_mut(uri) else {
            return false;
        };
        if doc.revision() != parsed.syntax.revision() {
            log::debug!(
                target: "hirogeru::parse",
                "Discarding tree for {} at revision {}; document is at {}",
                uri,
                parsed.syntax.revision(),
                doc.revision()
            );
            return false;
        }
        doc.set_trees(parsed.tree, parsed.syntax);
        true
    }

    /// Drop the trees of a document whose reparse failed at `revision`
    pub fn clear_trees(&self, uri: &Url, revision: i32) {
        if let Some(mut doc) = self.documents.get_mut(uri)
            && doc.revision() == revision
        {
            doc.clear_trees();
        }
    }

    /// Get the existing tree and apply edits for incremental parsing
    /// Returns the edited tree without updating the document store
    ///
    /// Returns None when the stored tree was not parsed from the current text,
    /// since the edits would then describe a different source.
    pub fn get_edited_tree(&self, uri: &Url, edits: &[InputEdit]) -> Option<Tree> {
        self.documents.get(uri).and_then(|doc| {
            let current = doc.syntax()?.revision() == doc.revision();
            doc.tree().filter(|_| current).map(|tree| {
                let mut tree = tree.clone();
                for edit in edits {
                    tree.edit(edit);
                }
                tree
            })
        })
    }

    pub fn remove(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }
}

impl DocumentSource for DocumentStore {
    fn text_document(&self, uri: &Url) -> Option<Arc<TextDocument>> {
        self.documents.get(uri).map(|doc| doc.text().clone())
    }
}

impl SyntaxModel for DocumentStore {
    fn root_node(&self, uri: &Url, revision: i32) -> ExpandResult<Arc<SyntaxTree>> {
        let doc = self
            .documents
            .get(uri)
            .ok_or_else(|| ExpandError::unknown_document(uri))?;

        let Some(syntax) = doc.syntax() else {
            return Err(ExpandError::unparseable(format!(
                "no syntax tree for {} ({})",
                uri,
                doc.language_id().unwrap_or("unknown language")
            )));
        };

        if syntax.revision() != revision {
            return Err(ExpandError::revision_mismatch(
                format!("revision {}", syntax.revision()),
                format!("revision {}", revision),
            ));
        }

        if syntax.has_error() && !self.allow_error_trees.load(Ordering::Relaxed) {
            return Err(ExpandError::unparseable(format!(
                "syntax tree for {} contains parse errors",
                uri
            )));
        }

        Ok(syntax.clone())
    }
}
