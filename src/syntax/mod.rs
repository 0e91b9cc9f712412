mod convert;
pub mod kind;
pub mod model;
pub mod tree;

// Re-export main types
pub use kind::{KindMap, SyntaxKind};
pub use model::SyntaxModel;
pub use tree::{NodeId, SyntaxNode, SyntaxTree, TreeBuilder};
