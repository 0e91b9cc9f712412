//! Arena-backed syntax tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. Children are
//! owned by index, parents are plain back-links, so upward navigation is O(1)
//! without reference cycles. Node 0 is always the root.

use crate::error::{ExpandError, ExpandResult};
use crate::syntax::SyntaxKind;
use crate::text::TextSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    name: &'static str,
    span: TextSpan,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable syntax tree for one revision of a document.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    revision: i32,
    has_error: bool,
}

impl SyntaxTree {
    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(NodeId::ROOT)
    }

    /// Look up a node handle. Ids are only meaningful for the tree that issued them.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id }
    }

    /// Document revision the tree was built from.
    pub fn revision(&self) -> i32 {
        self.revision
    }

    /// Length of the text the tree covers (the root span's end).
    pub fn len(&self) -> usize {
        self.nodes[NodeId::ROOT.index()].span.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A borrowed handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.tree.data(self.id).kind
    }

    /// The grammar's own name for this node.
    pub fn name(&self) -> &'static str {
        self.tree.data(self.id).name
    }

    pub fn span(&self) -> TextSpan {
        self.tree.data(self.id).span
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |id| tree.node(*id))
    }

    /// Proper ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        std::iter::successors(self.parent(), |node| node.parent())
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({}) @ {}", self.kind(), self.name(), self.span())
    }
}

/// Builds a [`SyntaxTree`] in document order.
///
/// Nodes are opened with [`start_node`](Self::start_node) and closed with
/// [`finish_node`](Self::finish_node); the first node opened is the root.
/// [`finish`](Self::finish) checks the containment and ordering invariants.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    revision: i32,
    has_error: bool,
}

impl TreeBuilder {
    pub fn new(revision: i32) -> Self {
        Self {
            nodes: Vec::new(),
            stack: Vec::new(),
            revision,
            has_error: false,
        }
    }

    pub fn start_node(&mut self, kind: SyntaxKind, name: &'static str, start: usize) {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().copied();
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(NodeData {
            kind,
            name,
            span: TextSpan::caret(start),
            parent,
            children: Vec::new(),
        });
        self.stack.push(id);
    }

    pub fn finish_node(&mut self, end: usize) {
        if let Some(id) = self.stack.pop() {
            let span = &mut self.nodes[id.index()].span;
            span.end = end.max(span.start);
        }
    }

    /// Add a leaf node.
    pub fn token(&mut self, kind: SyntaxKind, name: &'static str, span: TextSpan) {
        self.start_node(kind, name, span.start);
        self.finish_node(span.end);
    }

    pub fn mark_error(&mut self) {
        self.has_error = true;
    }

    pub fn finish(self) -> ExpandResult<SyntaxTree> {
        if self.nodes.is_empty() {
            return Err(ExpandError::unparseable("syntax tree has no root node"));
        }
        if !self.stack.is_empty() {
            return Err(ExpandError::unparseable(format!(
                "{} syntax node(s) left open",
                self.stack.len()
            )));
        }
        if self.nodes[NodeId::ROOT.index()].span.start != 0 {
            return Err(ExpandError::unparseable(
                "root node does not start at the beginning of the document",
            ));
        }

        for node in &self.nodes {
            let mut previous_end = node.span.start;
            for child in &node.children {
                let child = &self.nodes[child.index()];
                if !node.span.contains(child.span) {
                    return Err(ExpandError::unparseable(format!(
                        "{} at {} escapes its parent {} at {}",
                        child.name, child.span, node.name, node.span
                    )));
                }
                if child.span.start < previous_end {
                    return Err(ExpandError::unparseable(format!(
                        "{} at {} overlaps its previous sibling",
                        child.name, child.span
                    )));
                }
                previous_end = child.span.end;
            }
        }

        Ok(SyntaxTree {
            nodes: self.nodes,
            revision: self.revision,
            has_error: self.has_error,
        })
    }
}
