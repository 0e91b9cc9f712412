//! Built-in configuration for the bundled grammars.
//!
//! These settings form the lowest layer of the merge. User, workspace and
//! client settings only need to mention what they change.

use super::settings::{LanguageConfig, SelectionSettings};
use crate::syntax::SyntaxKind;
use std::collections::HashMap;

/// Returns the default settings: kind maps and filetypes for every bundled grammar.
pub fn default_settings() -> SelectionSettings {
    let mut languages = HashMap::new();
    languages.insert("java".to_string(), java_config());
    languages.insert("rust".to_string(), rust_config());

    SelectionSettings {
        languages,
        sibling_groups: None,
        allow_error_trees: Some(false),
    }
}

fn kinds(pairs: &[(&str, SyntaxKind)]) -> HashMap<String, SyntaxKind> {
    pairs
        .iter()
        .map(|(name, kind)| (name.to_string(), *kind))
        .collect()
}

fn java_config() -> LanguageConfig {
    use SyntaxKind::*;

    let kinds = kinds(&[
        ("program", CompilationUnit),
        // Declarations
        ("class_declaration", ClassDeclaration),
        ("interface_declaration", ClassDeclaration),
        ("enum_declaration", ClassDeclaration),
        ("record_declaration", ClassDeclaration),
        ("annotation_type_declaration", ClassDeclaration),
        ("method_declaration", MethodDeclaration),
        ("constructor_declaration", MethodDeclaration),
        ("block", Block),
        ("constructor_body", Block),
        // Statements
        ("local_variable_declaration", Statement),
        ("expression_statement", Statement),
        ("return_statement", Statement),
        ("throw_statement", Statement),
        ("while_statement", Statement),
        ("do_statement", Statement),
        ("for_statement", Statement),
        ("enhanced_for_statement", Statement),
        ("labeled_statement", Statement),
        ("synchronized_statement", Statement),
        ("yield_statement", Statement),
        ("break_statement", Statement),
        ("continue_statement", Statement),
        ("try_statement", TryStatement),
        ("try_with_resources_statement", TryStatement),
        ("catch_clause", CatchClause),
        ("finally_clause", FinallyClause),
        ("if_statement", IfStatement),
        ("switch_expression", SwitchStatement),
        ("switch_block_statement_group", SwitchCase),
        ("switch_rule", SwitchCase),
        // Expressions
        ("assignment_expression", Expression),
        ("binary_expression", Expression),
        ("unary_expression", Expression),
        ("update_expression", Expression),
        ("ternary_expression", Expression),
        ("cast_expression", Expression),
        ("instanceof_expression", Expression),
        ("lambda_expression", Expression),
        ("method_invocation", Expression),
        ("object_creation_expression", Expression),
        ("array_creation_expression", Expression),
        ("field_access", Expression),
        ("array_access", Expression),
        ("parenthesized_expression", Expression),
        ("method_reference", Expression),
    ]);

    LanguageConfig {
        filetypes: vec!["java".to_string()],
        kinds,
    }
}

fn rust_config() -> LanguageConfig {
    use SyntaxKind::*;

    let kinds = kinds(&[
        ("source_file", CompilationUnit),
        // Items
        ("struct_item", ClassDeclaration),
        ("enum_item", ClassDeclaration),
        ("trait_item", ClassDeclaration),
        ("impl_item", ClassDeclaration),
        ("mod_item", ClassDeclaration),
        ("function_item", MethodDeclaration),
        ("closure_expression", Expression),
        ("block", Block),
        // Statements
        ("let_declaration", Statement),
        ("expression_statement", Statement),
        ("return_expression", Statement),
        ("if_expression", IfStatement),
        ("else_clause", ElseClause),
        ("match_expression", SwitchStatement),
        ("match_arm", SwitchCase),
        // Expressions
        ("assignment_expression", Expression),
        ("binary_expression", Expression),
        ("unary_expression", Expression),
        ("call_expression", Expression),
        ("field_expression", Expression),
        ("index_expression", Expression),
        ("reference_expression", Expression),
        ("try_expression", Expression),
        ("await_expression", Expression),
        ("macro_invocation", Expression),
        ("parenthesized_expression", Expression),
        ("struct_expression", Expression),
    ]);

    LanguageConfig {
        filetypes: vec!["rs".to_string()],
        kinds,
    }
}
