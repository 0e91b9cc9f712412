//! Benchmark for selection expansion.
//!
//! Measures tree conversion, a single expansion step and a full chain from a
//! caret to the whole file on generated Java classes of growing size.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hirogeru::config::WorkspaceSettings;
use hirogeru::document::parse_document;
use hirogeru::language::{LanguageRegistry, ParserFactory};
use hirogeru::selection::{SiblingGroups, expand, selection_chain};
use hirogeru::syntax::SyntaxTree;
use hirogeru::text::{TextDocument, TextSpan};

/// Generate a Java class with N methods, each holding a try/catch.
fn generate_java_class(num_methods: usize) -> String {
    let mut doc = String::with_capacity(num_methods * 160);
    doc.push_str("package bench;\n\npublic class Generated {\n");

    for i in 0..num_methods {
        doc.push_str(&format!(
            "    int method{i}(int a, int b) {{\n        try {{\n            int sum = a + b * {i};\n            return sum;\n        }} catch (RuntimeException e) {{\n            return -{i};\n        }}\n    }}\n\n"
        ));
    }

    doc.push_str("}\n");
    doc
}

fn parse(doc: &str) -> (SyntaxTree, tree_sitter::Tree) {
    let factory = ParserFactory::new(LanguageRegistry::with_bundled());
    let kinds = WorkspaceSettings::default().kind_map("java");
    let text = TextDocument::new(doc.to_string(), 0);
    let parsed = parse_document(&factory, "java", &kinds, &text, None)
        .expect("Generated Java should parse");
    (parsed.syntax, parsed.tree)
}

/// Offset of the `+` in the last generated method, the deepest caret position.
fn deep_caret(doc: &str) -> TextSpan {
    let offset = doc.rfind(" + ").map(|i| i + 1).unwrap_or(0);
    TextSpan::caret(offset)
}

fn benchmark_expansion(c: &mut Criterion) {
    let groups = SiblingGroups::default();
    let kinds = WorkspaceSettings::default().kind_map("java");
    let mut group = c.benchmark_group("expand_selection");

    for num_methods in [10, 100, 1000].iter() {
        let doc = generate_java_class(*num_methods);
        let (syntax, ts_tree) = parse(&doc);
        let caret = deep_caret(&doc);

        group.bench_with_input(
            BenchmarkId::new("convert_tree", num_methods),
            &ts_tree,
            |b, ts_tree| b.iter(|| SyntaxTree::from_tree_sitter(ts_tree, &kinds, doc.len(), 0)),
        );

        group.bench_with_input(
            BenchmarkId::new("single_step", num_methods),
            &syntax,
            |b, syntax| b.iter(|| expand(syntax, caret, &groups)),
        );

        group.bench_with_input(
            BenchmarkId::new("full_chain", num_methods),
            &syntax,
            |b, syntax| b.iter(|| selection_chain(syntax, caret, &groups)),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_expansion);
criterion_main!(benches);
