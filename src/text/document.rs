use line_index::{LineCol, LineIndex, TextSize, WideEncoding, WideLineCol};

use crate::text::TextPosition;

/// An immutable snapshot of a document's text at one revision
///
/// The line table is built once per snapshot, so offset <-> (line, column)
/// conversions never rescan the text.
#[derive(Debug)]
pub struct TextDocument {
    text: String,
    revision: i32,
    index: LineIndex,
    line_count: u32,
}

impl TextDocument {
    /// Create a new text document snapshot
    pub fn new(text: String, revision: i32) -> Self {
        let index = LineIndex::new(&text);
        let line_count = text.bytes().filter(|b| *b == b'\n').count() as u32 + 1;
        Self {
            text,
            revision,
            index,
            line_count,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the revision (LSP document version) this snapshot belongs to
    pub fn revision(&self) -> i32 {
        self.revision
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    /// Convert a line and UTF-16 column into a byte offset.
    ///
    /// Returns `None` when the line does not exist. A column past the end of
    /// the line resolves to the line end (before any `\r\n`).
    pub fn offset_of(&self, line: u32, column: u32) -> Option<usize> {
        let line_start: usize = self.index.offset(LineCol { line, col: 0 })?.into();
        if line_start > self.text.len() {
            return None;
        }

        let rest = &self.text[line_start..];
        let line_end = match rest.find('\n') {
            Some(newline) => line_start + rest[..newline].trim_end_matches('\r').len(),
            None => self.text.len(),
        };

        let utf8 = self
            .index
            .to_utf8(WideEncoding::Utf16, WideLineCol { line, col: column })?;
        let mut offset = (line_start + utf8.col as usize).min(line_end);

        // A column inside a surrogate pair lands mid-character
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        Some(offset)
    }

    /// Convert a byte offset into a position with a UTF-16 column.
    ///
    /// Returns `None` for offsets past the end or inside a multi-byte character.
    pub fn position_of(&self, offset: usize) -> Option<TextPosition> {
        if offset > self.text.len() {
            return None;
        }
        let size = TextSize::try_from(offset).ok()?;
        let utf8 = self.index.try_line_col(size)?;
        let wide = self.index.to_wide(WideEncoding::Utf16, utf8)?;
        Some(TextPosition {
            line: wide.line,
            column: wide.col,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_document_creation() {
        let doc = TextDocument::new("hello world".to_string(), 3);
        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.revision(), 3);
        assert_eq!(doc.len(), 11);
        assert_eq!(doc.line_count(), 1);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_offset_position_roundtrip_on_ascii() {
        let doc = TextDocument::new("class A {\n    int x;\n}\n".to_string(), 0);

        let offset = doc.offset_of(1, 4).unwrap();
        assert_eq!(&doc.text()[offset..offset + 3], "int");

        let position = doc.position_of(offset).unwrap();
        assert_eq!((position.line, position.column), (1, 4));
    }

    #[test]
    fn test_columns_are_utf16_code_units() {
        // "é" is 2 bytes / 1 UTF-16 unit, "😀" is 4 bytes / 2 UTF-16 units
        let doc = TextDocument::new("é😀x\n".to_string(), 0);

        assert_eq!(doc.offset_of(0, 1), Some(2));
        assert_eq!(doc.offset_of(0, 3), Some(6));

        let position = doc.position_of(6).unwrap();
        assert_eq!((position.line, position.column), (0, 3));
    }

    #[test]
    fn test_position_past_end_is_none() {
        let doc = TextDocument::new("abc".to_string(), 0);
        assert!(doc.position_of(3).is_some());
        assert!(doc.position_of(4).is_none());
        assert!(doc.offset_of(1, 0).is_none());
    }

    #[test]
    fn test_column_past_line_end_is_clamped() {
        let doc = TextDocument::new("ab\r\ncd".to_string(), 0);
        assert_eq!(doc.offset_of(0, 10), Some(2));
        assert_eq!(doc.offset_of(1, 10), Some(6));
    }

    #[test]
    fn test_trailing_newline_opens_last_line() {
        let doc = TextDocument::new("ab\n".to_string(), 0);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.offset_of(1, 0), Some(3));
        let end = doc.position_of(3).unwrap();
        assert_eq!((end.line, end.column), (1, 0));
    }
}
