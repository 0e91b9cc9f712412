//! Expansion chains and their LSP `SelectionRange` form.
//!
//! `textDocument/selectionRange` wants, for each position, the whole list of
//! ranges from innermost to outermost, linked through `parent`. The chain is
//! just `expand` applied until it reports no further expansion, so each link
//! strictly contains the previous one.

use tower_lsp_server::ls_types::SelectionRange;

use crate::error::ExpandResult;
use crate::selection::{SiblingGroups, expand};
use crate::syntax::SyntaxTree;
use crate::text::{TextDocument, TextSpan, to_positions};

/// Successive expansions of `start`, innermost first. `start` itself is not included.
pub fn selection_chain(
    tree: &SyntaxTree,
    start: TextSpan,
    groups: &SiblingGroups,
) -> ExpandResult<Vec<TextSpan>> {
    let mut chain = Vec::new();
    let mut current = start;
    while let Some(next) = expand(tree, current, groups)? {
        chain.push(next);
        current = next;
    }
    Ok(chain)
}

/// Link innermost-first spans into a nested `SelectionRange`.
///
/// Returns `None` for an empty chain.
pub fn spans_to_selection_range(
    spans: &[TextSpan],
    document: &TextDocument,
) -> ExpandResult<Option<SelectionRange>> {
    let mut result: Option<SelectionRange> = None;
    for span in spans.iter().rev() {
        let range = to_positions(*span, document)?.to_lsp();
        result = Some(SelectionRange {
            range,
            parent: result.map(Box::new),
        });
    }
    Ok(result)
}
