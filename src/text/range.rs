//! Offset spans and positioned ranges.
//!
//! Offsets are UTF-8 byte offsets into the document text and are the canonical
//! coordinate. Line and column are derived from a [`TextDocument`] and use
//! UTF-16 code units for columns, matching the LSP default encoding.

use tower_lsp_server::ls_types::{Position, Range};

use crate::error::{ExpandError, ExpandResult};
use crate::text::TextDocument;

/// Half-open byte interval `[start, end)` within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    /// Create a span, swapping the bounds if they arrive reversed.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Zero-width span at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `other` lies within `self`. Equal spans contain each other.
    pub fn contains(&self, other: TextSpan) -> bool {
        contains(*self, other)
    }

    /// `other` lies within `self` and the two are not equal.
    pub fn strictly_contains(&self, other: TextSpan) -> bool {
        strictly_contains(*self, other)
    }
}

impl std::fmt::Display for TextSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// True iff `outer.start <= inner.start && inner.end <= outer.end`.
pub fn contains(outer: TextSpan, inner: TextSpan) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// [`contains`] and not equal.
pub fn strictly_contains(outer: TextSpan, inner: TextSpan) -> bool {
    contains(outer, inner) && outer != inner
}

/// A position carrying both coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl TextPosition {
    pub fn to_lsp(self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// A span together with its line/column endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub fn span(&self) -> TextSpan {
        TextSpan {
            start: self.start.offset,
            end: self.end.offset,
        }
    }

    pub fn to_lsp(self) -> Range {
        Range::new(self.start.to_lsp(), self.end.to_lsp())
    }
}

/// Convert an offset span to line/column form for the caller.
pub fn to_positions(span: TextSpan, document: &TextDocument) -> ExpandResult<TextRange> {
    let start = document.position_of(span.start).ok_or_else(|| {
        ExpandError::out_of_range(format!(
            "offset {} outside document of length {}",
            span.start,
            document.len()
        ))
    })?;
    let end = document.position_of(span.end).ok_or_else(|| {
        ExpandError::out_of_range(format!(
            "offset {} outside document of length {}",
            span.end,
            document.len()
        ))
    })?;
    Ok(TextRange { start, end })
}

/// Convert an LSP range into an offset span.
///
/// Positions on a line past the end of the document are rejected. A column past
/// the end of its line is clamped to the line end, as LSP prescribes.
pub fn from_positions(document: &TextDocument, range: Range) -> ExpandResult<TextSpan> {
    let offset = |position: Position| {
        document
            .offset_of(position.line, position.character)
            .ok_or_else(|| {
                ExpandError::out_of_range(format!(
                    "position {}:{} outside document with {} lines",
                    position.line,
                    position.character,
                    document.line_count()
                ))
            })
    };
    Ok(TextSpan::new(offset(range.start)?, offset(range.end)?))
}
