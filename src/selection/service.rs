//! Request-level selection operations.
//!
//! These functions sit between the LSP handlers and the pure expander: they
//! resolve a document snapshot and its tree, verify that both belong to the
//! same revision, and convert between line/column ranges and offsets.

use std::sync::Arc;

use tower_lsp_server::ls_types::{Position, Range, SelectionRange};
use url::Url;

use crate::error::{ExpandError, ExpandResult};
use crate::selection::{
    SelectionHistory, SiblingGroups, expand, selection_chain, spans_to_selection_range,
};
use crate::syntax::{SyntaxModel, SyntaxTree};
use crate::text::{TextDocument, TextSpan, from_positions, to_positions};

/// Supplies text snapshots. Paired with [`SyntaxModel`] for the trees.
pub trait DocumentSource {
    fn text_document(&self, uri: &Url) -> Option<Arc<TextDocument>>;
}

/// Resolve the text and the tree for `uri`, checking they agree.
fn snapshot<S>(source: &S, uri: &Url) -> ExpandResult<(Arc<TextDocument>, Arc<SyntaxTree>)>
where
    S: DocumentSource + SyntaxModel,
{
    let document = source
        .text_document(uri)
        .ok_or_else(|| ExpandError::unknown_document(uri))?;
    let tree = source.root_node(uri, document.revision())?;

    if tree.revision() != document.revision() {
        return Err(ExpandError::revision_mismatch(
            format!("revision {}", tree.revision()),
            format!("revision {}", document.revision()),
        ));
    }
    if tree.len() != document.len() {
        return Err(ExpandError::revision_mismatch(
            format!("{} bytes", tree.len()),
            format!("{} bytes", document.len()),
        ));
    }

    Ok((document, tree))
}

/// Expand `range` in the document at `uri` by one step.
///
/// Returns `Ok(None)` when the range already covers the whole document.
pub fn expand_selection<S>(
    source: &S,
    groups: &SiblingGroups,
    uri: &Url,
    range: Range,
) -> ExpandResult<Option<Range>>
where
    S: DocumentSource + SyntaxModel,
{
    let (document, tree) = snapshot(source, uri)?;
    let current = from_positions(&document, range)?;

    let Some(next) = expand(&tree, current, groups)? else {
        log::debug!(
            target: "hirogeru::selection",
            "{} already covers {}",
            current,
            uri
        );
        return Ok(None);
    };

    Ok(Some(to_positions(next, &document)?.to_lsp()))
}

/// Build the `textDocument/selectionRange` answer for each position.
///
/// Every position gets an entry. A position with nothing to expand to (an
/// empty document) gets its own zero-width range.
pub fn selection_ranges<S>(
    source: &S,
    groups: &SiblingGroups,
    uri: &Url,
    positions: &[Position],
) -> ExpandResult<Vec<SelectionRange>>
where
    S: DocumentSource + SyntaxModel,
{
    let (document, tree) = snapshot(source, uri)?;

    positions
        .iter()
        .map(|position| {
            let caret = from_positions(&document, Range::new(*position, *position))?;
            let chain = selection_chain(&tree, caret, groups)?;
            match spans_to_selection_range(&chain, &document)? {
                Some(selection) => Ok(selection),
                None => Ok(SelectionRange {
                    range: to_positions(TextSpan::caret(caret.start), &document)?.to_lsp(),
                    parent: None,
                }),
            }
        })
        .collect()
}

/// Step back to the selection that was expanded into `range`.
pub fn shrink_selection(history: &SelectionHistory, uri: &Url, range: Range) -> Option<Range> {
    history.shrink(uri, range)
}
