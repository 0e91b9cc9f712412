//! Parsing a text snapshot into both tree forms.

use tree_sitter::Tree;

use crate::error::{ExpandError, ExpandResult};
use crate::language::ParserFactory;
use crate::syntax::{KindMap, SyntaxTree};
use crate::text::TextDocument;

/// Output of one parse: the tree-sitter tree (kept for incremental reparsing)
/// and its arena conversion (used for expansion)
pub struct ParsedDocument {
    pub tree: Tree,
    pub syntax: SyntaxTree,
}

/// Parse `text` as `language_id` and convert the result.
///
/// `old_tree` must already have the edits since its revision applied.
pub fn parse_document(
    factory: &ParserFactory,
    language_id: &str,
    kinds: &KindMap,
    text: &TextDocument,
    old_tree: Option<&Tree>,
) -> ExpandResult<ParsedDocument> {
    let tree = factory
        .parse(language_id, text.text(), old_tree)
        .ok_or_else(|| ExpandError::unparseable(format!("no parser for {}", language_id)))?;

    let syntax = SyntaxTree::from_tree_sitter(&tree, kinds, text.len(), text.revision())?;
    log::debug!(
        target: "hirogeru::parse",
        "Parsed {} revision {} into {} nodes{}",
        language_id,
        text.revision(),
        syntax.node_count(),
        if syntax.has_error() { " (with errors)" } else { "" }
    );

    Ok(ParsedDocument { tree, syntax })
}
