pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod lsp;
pub mod selection;
pub mod syntax;
pub mod text;

// Re-export the main entry points
pub use config::WorkspaceSettings;
pub use error::{ExpandError, ExpandResult};
pub use selection::{SiblingGroups, expand};
pub use syntax::{SyntaxKind, SyntaxTree};
pub use text::{TextDocument, TextSpan};

// Re-export the main server implementation
pub use lsp::Hirogeru;
