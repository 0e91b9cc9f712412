//! Anchor lookup: the deepest node that covers the current selection.

use crate::syntax::{SyntaxNode, SyntaxTree};
use crate::text::TextSpan;

/// Find the deepest node whose span covers `current`.
///
/// For a caret the descent follows the child with `start <= offset < end`, so a
/// caret sitting between two siblings lands in the one that begins there.
/// For a non-empty selection the descent follows the child that contains the
/// whole range, stopping at the lowest common ancestor when the selection
/// crosses sibling boundaries.
///
/// `current` must lie within the root span.
pub fn find_anchor(tree: &SyntaxTree, current: TextSpan) -> SyntaxNode<'_> {
    let mut node = tree.root();
    loop {
        let next = if current.is_empty() {
            node.children().find(|child| {
                let span = child.span();
                span.start <= current.start && current.start < span.end
            })
        } else {
            node.children().find(|child| child.span().contains(current))
        };

        match next {
            Some(child) => node = child,
            None => return node,
        }
    }
}
