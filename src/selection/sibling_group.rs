//! Sibling-group expansion table.
//!
//! Some clauses are not a meaningful selection on their own: a `catch` clause
//! means little without the `try` it belongs to. For those kinds the expander
//! jumps straight to the enclosing statement that groups the sibling clauses.

use serde::{Deserialize, Serialize};

use crate::syntax::{SyntaxKind, SyntaxNode};
use crate::text::TextSpan;

/// One table entry: selections in a `member` expand to the enclosing `group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiblingGroup {
    pub member: SyntaxKind,
    pub group: SyntaxKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingGroups {
    rules: Vec<SiblingGroup>,
}

impl Default for SiblingGroups {
    fn default() -> Self {
        Self::new(vec![
            SiblingGroup {
                member: SyntaxKind::CatchClause,
                group: SyntaxKind::TryStatement,
            },
            SiblingGroup {
                member: SyntaxKind::FinallyClause,
                group: SyntaxKind::TryStatement,
            },
            SiblingGroup {
                member: SyntaxKind::ElseClause,
                group: SyntaxKind::IfStatement,
            },
        ])
    }
}

impl SiblingGroups {
    pub fn new(rules: Vec<SiblingGroup>) -> Self {
        Self { rules }
    }

    /// A table without entries; expansion follows plain parent links.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[SiblingGroup] {
        &self.rules
    }

    pub fn group_for(&self, member: SyntaxKind) -> Option<SyntaxKind> {
        self.rules
            .iter()
            .find(|rule| rule.member == member)
            .map(|rule| rule.group)
    }

    /// The group node a selection anchored at `anchor` should expand to.
    ///
    /// Applies when the anchor is a member clause, or a direct part of one
    /// (such as the clause's body block). The target is the nearest enclosing
    /// node of the group kind that strictly contains `current`.
    pub fn target<'t>(&self, anchor: SyntaxNode<'t>, current: TextSpan) -> Option<SyntaxNode<'t>> {
        if self.rules.is_empty() {
            return None;
        }

        let (member, group) = std::iter::once(anchor)
            .chain(anchor.parent())
            .find_map(|node| self.group_for(node.kind()).map(|group| (node, group)))?;

        member
            .ancestors()
            .find(|ancestor| ancestor.kind() == group && ancestor.span().strictly_contains(current))
    }
}
