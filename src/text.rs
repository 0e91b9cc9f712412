//! Text model: document snapshots and ranges.
//!
//! This module provides:
//! - Offset spans and line/column ranges with containment checks
//! - Immutable document snapshots with an offset <-> (line, column) indexer

mod document;
pub mod range;

pub use document::TextDocument;
pub use range::{
    TextPosition, TextRange, TextSpan, contains, from_positions, strictly_contains, to_positions,
};
