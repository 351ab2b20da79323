use gosig_core::Error;
use gosig_engine::extract::render_type;
use gosig_engine::parser::{LanguageParser, Node, ParserRegistry};
use std::path::Path;

fn functions(source: &[u8]) -> Vec<gosig_engine::parser::FuncDecl> {
    let registry = ParserRegistry::new();
    let tree = registry.parse_file(Path::new("lib.go"), source).unwrap();
    tree.nodes
        .into_iter()
        .filter_map(|n| match n {
            Node::FunctionDeclaration(decl) => Some(decl),
            Node::Other { .. } => None,
        })
        .collect()
}

#[test]
fn test_registry_detects_language() {
    let registry = ParserRegistry::new();
    assert!(registry.supports_file(Path::new("main.go")));
    assert!(registry.supports_file(Path::new("pkg/x/y_test.go")));
    assert!(!registry.supports_file(Path::new("main.rs")));
    assert!(!registry.supports_file(Path::new("go.mod")));
    assert!(!registry.supports_file(Path::new("noext")));
}

#[test]
fn test_empty_registry_supports_nothing() {
    let registry = ParserRegistry::empty();
    assert!(!registry.supports_file(Path::new("main.go")));
    let result = registry.parse_file(Path::new("main.go"), b"package main\n");
    assert!(matches!(result, Err(Error::UnsupportedLanguage(_))));
}

#[test]
fn test_unsupported_extension() {
    let registry = ParserRegistry::new();
    let result = registry.parse_file(Path::new("data.csv"), b"a,b,c");
    assert!(matches!(result, Err(Error::UnsupportedLanguage(_))));
}

fn parse_failure(source: &[u8]) -> (u32, u32, String) {
    let registry = ParserRegistry::new();
    match registry.parse_file(Path::new("bad.go"), source) {
        Err(Error::ParseFailed { position, message }) => (position.line, position.column, message),
        other => panic!("expected ParseFailed, got {other:?}"),
    }
}

#[test]
fn test_parse_empty_file_needs_package() {
    let (line, column, message) = parse_failure(b"");
    assert_eq!((line, column), (1, 1));
    assert!(message.contains("package"), "{message}");
}

#[test]
fn test_package_clause_only() {
    let registry = ParserRegistry::new();
    let tree = registry
        .parse_file(Path::new("doc.go"), b"// Package p does nothing.\npackage p\n")
        .unwrap();
    assert_eq!(tree.nodes.len(), 1);
}

#[test]
fn test_missing_package_clause_rejected() {
    let (line, _, message) = parse_failure(b"func f(x int) int { return x }\n");
    assert_eq!(line, 1);
    assert!(message.contains("package"), "{message}");
}

#[test]
fn test_second_package_clause_rejected() {
    let (line, _, message) = parse_failure(b"package p\npackage q\n");
    assert_eq!(line, 2);
    assert!(message.contains("package"), "{message}");
}

#[test]
fn test_import_after_declaration_rejected() {
    let (line, _, message) =
        parse_failure(b"package p\n\nfunc f() {}\n\nimport \"fmt\"\n");
    assert_eq!(line, 5);
    assert!(message.contains("import"), "{message}");
}

#[test]
fn test_top_level_statement_rejected() {
    let (line, _, message) = parse_failure(b"package p\n\nx := 1\n");
    assert_eq!(line, 3);
    assert!(message.contains("outside function body"), "{message}");
}

#[test]
fn test_mixed_named_and_unnamed_parameters_rejected() {
    let (line, column, message) = parse_failure(b"package p\nfunc f(a, b int, string) {}\n");
    assert_eq!((line, column), (2, 7));
    assert!(message.contains("mixed"), "{message}");

    // The rule holds for func types nested in a signature as well.
    let (line, _, _) = parse_failure(b"package p\nfunc g(cb func(n int, error)) {}\n");
    assert_eq!(line, 2);
}

#[test]
fn test_comments_and_line_breaks_leave_type_text() {
    let decls = functions(b"package p\nfunc f(m map[string]/*c*/int) [\n2]int { return [2]int{} }\n");
    let params = decls[0].params.as_ref().unwrap();
    assert_eq!(render_type(&params[0].ty), "map[string]int");
    let results = decls[0].results.as_ref().unwrap();
    assert_eq!(render_type(&results[0].ty), "[2]int");
}

#[test]
fn test_struct_tags_kept_whole() {
    let decls = functions(b"package p\nfunc f(v struct {\n\tName string `json:\"a  b\"`\n}) {}\n");
    let params = decls[0].params.as_ref().unwrap();
    assert_eq!(
        render_type(&params[0].ty),
        "struct { Name string `json:\"a  b\"` }"
    );
}

#[test]
fn test_top_level_nodes_in_order() {
    let registry = ParserRegistry::new();
    let source = br#"package shapes

import "math"

type Circle struct{ R float64 }

func Area(c Circle) float64 { return math.Pi * c.R * c.R }
"#;
    let tree = registry.parse_file(Path::new("shapes.go"), source).unwrap();
    let kinds: Vec<&str> = tree
        .nodes
        .iter()
        .map(|n| match n {
            Node::FunctionDeclaration(_) => "func",
            Node::Other { kind } => kind.as_str(),
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["package_clause", "import_declaration", "type_declaration", "func"]
    );
}

#[test]
fn test_parameter_groups_keep_names() {
    let decls = functions(b"package p\nfunc foo(x, y int, s string) {}\n");
    assert_eq!(decls.len(), 1);
    let params = decls[0].params.as_ref().unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].names, vec!["x", "y"]);
    assert_eq!(render_type(&params[0].ty), "int");
    assert_eq!(params[1].names, vec!["s"]);
    assert!(decls[0].results.is_none());
}

#[test]
fn test_bare_result_is_single_unnamed_field() {
    let decls = functions(b"package p\nfunc h() error { return nil }\n");
    let results = decls[0].results.as_ref().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].names.is_empty());
    assert_eq!(render_type(&results[0].ty), "error");
}

#[test]
fn test_variadic_parameter_flagged() {
    let decls = functions(b"package p\nfunc logf(format string, args ...any) {}\n");
    let params = decls[0].params.as_ref().unwrap();
    assert!(!params[0].variadic);
    assert!(params[1].variadic);
    assert_eq!(render_type(&params[1].ty), "any");
}

#[test]
fn test_method_receiver_is_dropped() {
    let decls = functions(b"package p\ntype S struct{}\nfunc (s *S) Name() string { return \"\" }\n");
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].name, "Name");
    assert!(decls[0].params.as_ref().unwrap().is_empty());
}

#[test]
fn test_func_offset_points_at_keyword() {
    let source = b"package p\n\n// Doc comment.\nfunc f() {}\n";
    let decls = functions(source);
    assert_eq!(&source[decls[0].func_offset..decls[0].func_offset + 4], b"func");
}

#[test]
fn test_syntax_error_is_parse_failure() {
    let registry = ParserRegistry::new();
    let result = registry.parse_file(Path::new("bad.go"), b"package p\n\nfunc broken( {\n");
    match result {
        Err(Error::ParseFailed { position, .. }) => {
            assert_eq!(position.file, Path::new("bad.go"));
            assert!(position.line >= 3, "unexpected line {}", position.line);
        }
        other => panic!("expected ParseFailed, got {other:?}"),
    }
}

#[test]
fn test_go_parser_extensions() {
    let parser = gosig_engine::parser::GoParser::new();
    assert_eq!(parser.extensions(), &["go"]);
}
