//! Error handling types for hirogeru
//!
//! Every failure of a selection request is reported as one of these variants.
//! Nothing is coerced into an empty or best-guess range.

use std::sync::PoisonError;
use thiserror::Error;

/// Error type for selection expansion and the layers around it
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The document is unknown, or the requested offsets fall outside it
    #[error("Range out of bounds: {message}")]
    OutOfRange { message: String },

    /// No syntax tree could be produced for the document
    #[error("Document could not be parsed: {message}")]
    Unparseable { message: String },

    /// The syntax tree and the text were taken from different revisions
    #[error("Revision mismatch: tree is for {tree}, document is at {document}")]
    RevisionMismatch { tree: String, document: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for selection operations
pub type ExpandResult<T> = Result<T, ExpandError>;

/// Helper trait to convert PoisonError into a recovered guard
pub trait LockResultExt<T> {
    /// Recover the guard from a poisoned lock, logging which operation hit it.
    fn recover_poison(self, context: &str) -> T;
}

impl<T> LockResultExt<T> for Result<T, PoisonError<T>> {
    fn recover_poison(self, context: &str) -> T {
        match self {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!(
                    target: "hirogeru::lock_recovery",
                    "Recovered from poisoned lock in {}",
                    context
                );
                poisoned.into_inner()
            }
        }
    }
}

/// Helper functions for common error patterns
impl ExpandError {
    /// Create an out-of-range error
    pub fn out_of_range(message: impl Into<String>) -> Self {
        ExpandError::OutOfRange {
            message: message.into(),
        }
    }

    /// Create the out-of-range error reported for documents the server does not know
    pub fn unknown_document(uri: impl std::fmt::Display) -> Self {
        ExpandError::OutOfRange {
            message: format!("unknown document {}", uri),
        }
    }

    /// Create an unparseable error
    pub fn unparseable(message: impl Into<String>) -> Self {
        ExpandError::Unparseable {
            message: message.into(),
        }
    }

    /// Create a revision mismatch error
    pub fn revision_mismatch(tree: impl ToString, document: impl ToString) -> Self {
        ExpandError::RevisionMismatch {
            tree: tree.to_string(),
            document: document.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        ExpandError::Config {
            message: message.into(),
        }
    }
}
