//! Language-independent node kinds.
//!
//! Grammars name their nodes freely (`try_statement`, `function_item`, ...).
//! The expander only reasons about a small fixed vocabulary, so every grammar
//! name is mapped onto a [`SyntaxKind`] through a per-language [`KindMap`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SyntaxKind {
    CompilationUnit,
    ClassDeclaration,
    MethodDeclaration,
    Block,
    Statement,
    TryStatement,
    CatchClause,
    FinallyClause,
    IfStatement,
    ElseClause,
    SwitchStatement,
    SwitchCase,
    Expression,
    Other,
}

/// Maps grammar node names to [`SyntaxKind`]s. Unmapped names are `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindMap {
    kinds: HashMap<String, SyntaxKind>,
}

impl KindMap {
    pub fn new(kinds: HashMap<String, SyntaxKind>) -> Self {
        Self { kinds }
    }

    pub fn from_pairs(pairs: &[(&str, SyntaxKind)]) -> Self {
        Self {
            kinds: pairs
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
        }
    }

    pub fn kind_of(&self, name: &str) -> SyntaxKind {
        self.kinds.get(name).copied().unwrap_or(SyntaxKind::Other)
    }

    /// Add or replace entries, keeping the rest.
    pub fn extend(&mut self, other: &HashMap<String, SyntaxKind>) {
        for (name, kind) in other {
            self.kinds.insert(name.clone(), *kind);
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
