pub mod parse;
pub mod store;

pub(crate) mod model;

// Re-export main types
pub use model::Document;
pub use parse::{ParsedDocument, parse_document};
pub use store::{DocumentHandle, DocumentStore};
