//! Conversion from tree-sitter trees into the arena representation.

use crate::error::ExpandResult;
use crate::syntax::{KindMap, SyntaxTree, TreeBuilder};

impl SyntaxTree {
    /// Copy a tree-sitter tree into an arena tree.
    ///
    /// Every node is kept, named or anonymous, so delimiters and keywords
    /// (`{`, `catch`, `;`) remain addressable. tree-sitter starts the root after
    /// leading whitespace; the root span is widened to `[0, text_len)` so it
    /// covers the whole document.
    pub fn from_tree_sitter(
        tree: &tree_sitter::Tree,
        kinds: &KindMap,
        text_len: usize,
        revision: i32,
    ) -> ExpandResult<SyntaxTree> {
        let root = tree.root_node();
        let mut builder = TreeBuilder::new(revision);
        if root.has_error() {
            builder.mark_error();
        }

        builder.start_node(kinds.kind_of(root.kind()), root.kind(), 0);

        let mut cursor = root.walk();
        if cursor.goto_first_child() {
            'walk: loop {
                let node = cursor.node();
                builder.start_node(kinds.kind_of(node.kind()), node.kind(), node.start_byte());
                if cursor.goto_first_child() {
                    continue;
                }
                builder.finish_node(node.end_byte());

                loop {
                    if cursor.goto_next_sibling() {
                        continue 'walk;
                    }
                    if !cursor.goto_parent() || cursor.depth() == 0 {
                        break 'walk;
                    }
                    builder.finish_node(cursor.node().end_byte());
                }
            }
        }

        builder.finish_node(text_len.max(root.end_byte()));
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxKind;
    use crate::text::TextSpan;

    fn parse_rust(text: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .unwrap();
        parser.parse(text, None).unwrap()
    }

    #[test]
    fn test_conversion_keeps_every_node() {
        let text = "fn main() { let x = 1; }\n";
        let ts_tree = parse_rust(text);
        let kinds = KindMap::from_pairs(&[
            ("source_file", SyntaxKind::CompilationUnit),
            ("function_item", SyntaxKind::MethodDeclaration),
            ("block", SyntaxKind::Block),
        ]);

        let tree = SyntaxTree::from_tree_sitter(&ts_tree, &kinds, text.len(), 7).unwrap();

        assert_eq!(tree.revision(), 7);
        assert_eq!(tree.len(), text.len());
        assert!(!tree.has_error());

        let root = tree.root();
        assert_eq!(root.kind(), SyntaxKind::CompilationUnit);

        let function = root.children().next().unwrap();
        assert_eq!(function.kind(), SyntaxKind::MethodDeclaration);
        assert_eq!(function.span(), TextSpan::new(0, 24));

        let block = function.children().last().unwrap();
        assert_eq!(block.kind(), SyntaxKind::Block);
        assert_eq!(block.span(), TextSpan::new(10, 24));
        let delimiters: Vec<_> = block.children().map(|c| c.name()).collect();
        assert_eq!(delimiters.first(), Some(&"{"));
        assert_eq!(delimiters.last(), Some(&"}"));
    }

    #[test]
    fn test_root_covers_leading_whitespace() {
        let text = "\n\nfn main() {}\n";
        let ts_tree = parse_rust(text);
        let tree = SyntaxTree::from_tree_sitter(&ts_tree, &KindMap::default(), text.len(), 0)
            .unwrap();

        assert_eq!(tree.root().span(), TextSpan::new(0, text.len()));
        let function = tree.root().children().next().unwrap();
        assert_eq!(function.span().start, 2);
    }

    #[test]
    fn test_error_trees_are_flagged() {
        let text = "fn main( {";
        let ts_tree = parse_rust(text);
        let tree = SyntaxTree::from_tree_sitter(&ts_tree, &KindMap::default(), text.len(), 0)
            .unwrap();
        assert!(tree.has_error());
    }
}
