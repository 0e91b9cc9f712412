//! Text synchronization for `didChange`.
//!
//! Applies LSP content changes to the stored text and, for ranged changes,
//! builds the tree-sitter `InputEdit`s that let the previous tree be reused.
//! A full-text change makes earlier edits meaningless, so it clears them.

use tower_lsp_server::ls_types::{Position, TextDocumentContentChangeEvent};
use tree_sitter::{InputEdit, Point};

use crate::text::TextDocument;

/// Byte offset and tree-sitter point (byte column) of an LSP position.
///
/// Positions past the last line resolve to the end of the text.
fn locate(document: &TextDocument, position: Position) -> (usize, Point) {
    match (
        document.offset_of(position.line, position.character),
        document.offset_of(position.line, 0),
    ) {
        (Some(offset), Some(line_start)) => (
            offset,
            Point::new(position.line as usize, offset - line_start),
        ),
        _ => {
            let end = document.len();
            let end_point = document
                .position_of(end)
                .and_then(|p| document.offset_of(p.line, 0).map(|start| (p.line, start)))
                .map(|(line, start)| Point::new(line as usize, end - start))
                .unwrap_or_default();
            (end, end_point)
        }
    }
}

/// Apply content changes to text and build tree-sitter InputEdits.
///
/// Returns the updated text and the edits for incremental parsing. The edits
/// are empty when any change replaced the whole document, in which case the
/// caller must parse from scratch.
pub(crate) fn apply_content_changes_with_edits(
    old_text: &str,
    content_changes: Vec<TextDocumentContentChangeEvent>,
) -> (String, Vec<InputEdit>) {
    let mut text = old_text.to_string();
    let mut edits = Vec::new();

    for change in content_changes {
        if let Some(range) = change.range {
            let document = TextDocument::new(text.clone(), 0);
            let (start_offset, start_point) = locate(&document, range.start);
            let (end_offset, old_end_point) = locate(&document, range.end);
            let end_offset = end_offset.max(start_offset);

            let new_end_offset = start_offset + change.text.len();
            // tree-sitter columns are bytes
            let new_end_point = match change.text.rsplit_once('\n') {
                Some((before, last_line)) => Point::new(
                    start_point.row + before.matches('\n').count() + 1,
                    last_line.len(),
                ),
                None => Point::new(start_point.row, start_point.column + change.text.len()),
            };

            edits.push(InputEdit {
                start_byte: start_offset,
                old_end_byte: end_offset,
                new_end_byte: new_end_offset,
                start_position: start_point,
                old_end_position: old_end_point,
                new_end_position: new_end_point,
            });

            text.replace_range(start_offset..end_offset, &change.text);
        } else {
            text = change.text;
            edits.clear();
        }
    }

    (text, edits)
}
