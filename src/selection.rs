//! Selection expansion over syntax trees.
//!
//! `expand` takes the current selection and returns the next strictly larger
//! range worth selecting, or `None` once the whole document is selected.
//! Repeated calls walk outward: expression, statement, block, method, class,
//! file.

mod anchor;
pub mod chain;
pub mod history;
pub mod service;
pub mod sibling_group;

pub use anchor::find_anchor;
pub use chain::{selection_chain, spans_to_selection_range};
pub use history::SelectionHistory;
pub use service::{DocumentSource, expand_selection, selection_ranges, shrink_selection};
pub use sibling_group::{SiblingGroup, SiblingGroups};

use crate::error::{ExpandError, ExpandResult};
use crate::syntax::SyntaxTree;
use crate::text::TextSpan;

/// Compute the next outward selection.
///
/// - A selection strictly inside its anchor expands to the anchor's span.
/// - A selection equal to its anchor expands to the first ancestor with a
///   strictly larger span, so wrapper nodes that add no text are skipped.
/// - Anchors inside a sibling-group member (see [`SiblingGroups`]) expand to
///   the enclosing group node instead.
///
/// Returns `Ok(None)` when `current` already spans the whole tree, and
/// `OutOfRange` when `current` reaches past the end of the tree.
pub fn expand(
    tree: &SyntaxTree,
    current: TextSpan,
    groups: &SiblingGroups,
) -> ExpandResult<Option<TextSpan>> {
    if current.end > tree.len() {
        return Err(ExpandError::out_of_range(format!(
            "selection {} reaches past the end of the document ({} bytes)",
            current,
            tree.len()
        )));
    }

    let anchor = find_anchor(tree, current);

    if let Some(target) = groups.target(anchor, current) {
        log::trace!(
            target: "hirogeru::selection",
            "{} anchored at {:?} expands to group {:?}",
            current,
            anchor,
            target
        );
        return Ok(Some(target.span()));
    }

    if anchor.span().strictly_contains(current) {
        log::trace!(target: "hirogeru::selection", "{} expands to anchor {:?}", current, anchor);
        return Ok(Some(anchor.span()));
    }

    let next = anchor
        .ancestors()
        .map(|ancestor| ancestor.span())
        .find(|span| span.strictly_contains(current));
    log::trace!(
        target: "hirogeru::selection",
        "{} equals anchor {:?}, next ancestor span {:?}",
        current,
        anchor,
        next
    );
    Ok(next)
}
