use super::{
    Field, FuncDecl, LanguageParser, Node, PositionResolver, SyntaxTree, TypeExpr, TypeToken,
};
use gosig_core::{Error, Result};
use std::path::Path;
use tree_sitter::Parser;

/// Declarations allowed at the top level after the package clause.
const TOP_LEVEL_DECLARATIONS: &[&str] = &[
    "import_declaration",
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

/// Go syntax tree provider backed by tree-sitter.
///
/// Lowers the concrete tree-sitter tree into [`SyntaxTree`], keeping only
/// what signature extraction needs from function and method declarations.
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }

    /// Create a configured tree-sitter parser for Go.
    fn create_parser() -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::Internal(format!("Failed to load Go grammar: {e}")))?;
        Ok(parser)
    }

    /// Parse source bytes into a tree-sitter tree.
    fn parse_tree(source: &[u8]) -> Result<tree_sitter::Tree> {
        let mut parser = Self::create_parser()?;
        parser
            .parse(source, None)
            .ok_or_else(|| Error::Internal("tree-sitter parse returned None".into()))
    }

    fn node_text(node: &tree_sitter::Node, source: &[u8]) -> String {
        String::from_utf8_lossy(&source[node.byte_range()]).into_owned()
    }

    /// Depth-first search for the first `ERROR` or `MISSING` node.
    fn first_error<'t>(node: tree_sitter::Node<'t>) -> Option<tree_sitter::Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(found) = Self::first_error(child) {
                return Some(found);
            }
        }
        Some(node)
    }

    fn error_message(node: &tree_sitter::Node, source: &[u8]) -> String {
        if node.is_missing() {
            return format!("expected {}", node.kind());
        }
        let text = Self::node_text(node, source);
        let snippet: String = text.split_whitespace().next().unwrap_or("").chars().take(24).collect();
        if snippet.is_empty() {
            "syntax error".to_string()
        } else {
            format!("syntax error near {snippet:?}")
        }
    }

    /// Lower a `function_declaration` or `method_declaration`. The receiver
    /// of a method is not recorded.
    fn lower_function(node: &tree_sitter::Node, source: &[u8]) -> FuncDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| Self::node_text(&n, source))
            .unwrap_or_default();

        let mut cursor = node.walk();
        let func_offset = node
            .children(&mut cursor)
            .find(|c| c.kind() == "func")
            .map_or(node.start_byte(), |c| c.start_byte());

        let params = node
            .child_by_field_name("parameters")
            .map(|list| Self::lower_fields(&list, source));

        // `result` is either a parenthesised list or a single bare type.
        let results = node.child_by_field_name("result").map(|result| {
            if result.kind() == "parameter_list" {
                Self::lower_fields(&result, source)
            } else {
                vec![Field {
                    names: Vec::new(),
                    ty: Self::lower_type(&result, source),
                    variadic: false,
                }]
            }
        });

        FuncDecl {
            name,
            func_offset,
            params,
            results,
        }
    }

    /// Lower a `parameter_list` into fields, skipping comments.
    fn lower_fields(list: &tree_sitter::Node, source: &[u8]) -> Vec<Field> {
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter_map(|child| {
                let variadic = match child.kind() {
                    "parameter_declaration" => false,
                    "variadic_parameter_declaration" => true,
                    _ => return None,
                };
                let ty = child.child_by_field_name("type")?;
                let mut names_cursor = child.walk();
                let names = child
                    .children_by_field_name("name", &mut names_cursor)
                    .map(|n| Self::node_text(&n, source))
                    .collect();
                Some(Field {
                    names,
                    ty: Self::lower_type(&ty, source),
                    variadic,
                })
            })
            .collect()
    }

    /// Collect the leaf tokens of a type node, dropping comments and
    /// terminators but remembering where the source had whitespace.
    fn lower_type(node: &tree_sitter::Node, source: &[u8]) -> TypeExpr {
        let mut lowered = TypeExpr::default();
        let mut prev_end = node.start_byte();
        let mut gap = false;
        Self::collect_tokens(*node, source, &mut prev_end, &mut gap, &mut lowered.tokens);
        lowered
    }

    fn collect_tokens(
        node: tree_sitter::Node,
        source: &[u8],
        prev_end: &mut usize,
        gap: &mut bool,
        tokens: &mut Vec<TypeToken>,
    ) {
        // String literals (struct tags) are kept whole.
        if node.child_count() > 0 && !node.kind().ends_with("string_literal") {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                Self::collect_tokens(child, source, prev_end, gap, tokens);
            }
            return;
        }

        if node.start_byte() > *prev_end {
            *gap |= source[*prev_end..node.start_byte()]
                .iter()
                .any(u8::is_ascii_whitespace);
        }
        *prev_end = (*prev_end).max(node.end_byte());

        let text = Self::node_text(&node, source);
        if node.kind() == "comment" {
            return;
        }
        if text.trim().is_empty() {
            *gap = true;
            return;
        }
        let spaced = std::mem::take(gap) && !tokens.is_empty();
        tokens.push(TypeToken { text, spaced });
    }

    /// Rules Go's parser enforces that the tree-sitter grammar accepts:
    /// a single leading package clause, imports before other declarations,
    /// only declarations at top level, and no parameter list mixing named
    /// and unnamed parameters.
    fn first_violation<'t>(
        root: tree_sitter::Node<'t>,
    ) -> Option<(tree_sitter::Node<'t>, String)> {
        let mut cursor = root.walk();
        let decls: Vec<_> = root
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect();

        match decls.first() {
            Some(first) if first.kind() == "package_clause" => {}
            Some(first) => return Some((*first, "expected 'package'".into())),
            None => return Some((root, "expected 'package', found EOF".into())),
        }

        let mut seen_decl = false;
        for node in &decls[1..] {
            match node.kind() {
                "package_clause" => {
                    return Some((*node, "unexpected second package clause".into()))
                }
                "import_declaration" if seen_decl => {
                    let message = "imports must appear before other declarations";
                    return Some((*node, message.into()));
                }
                "import_declaration" => {}
                kind if TOP_LEVEL_DECLARATIONS.contains(&kind) => seen_decl = true,
                kind => {
                    return Some((
                        *node,
                        format!("non-declaration statement outside function body ({kind})"),
                    ))
                }
            }
        }

        Self::mixed_parameter_list(root)
            .map(|list| (list, "mixed named and unnamed parameters".into()))
    }

    fn mixed_parameter_list<'t>(node: tree_sitter::Node<'t>) -> Option<tree_sitter::Node<'t>> {
        let mut cursor = node.walk();
        if node.kind() == "parameter_list" {
            let (mut named, mut unnamed) = (false, false);
            for child in node.named_children(&mut cursor) {
                if matches!(
                    child.kind(),
                    "parameter_declaration" | "variadic_parameter_declaration"
                ) {
                    if child.child_by_field_name("name").is_some() {
                        named = true;
                    } else {
                        unnamed = true;
                    }
                }
            }
            if named && unnamed {
                return Some(node);
            }
        }
        for child in node.named_children(&mut cursor) {
            if let Some(found) = Self::mixed_parameter_list(child) {
                return Some(found);
            }
        }
        None
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for GoParser {
    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn parse(&self, source: &[u8], file_path: &Path) -> Result<SyntaxTree> {
        let tree = Self::parse_tree(source)?;
        let root = tree.root_node();
        let positions = PositionResolver::new(file_path, source);

        if let Some(bad) = Self::first_error(root) {
            return Err(Error::ParseFailed {
                position: positions.resolve(bad.start_byte()),
                message: Self::error_message(&bad, source),
            });
        }
        if let Some((bad, message)) = Self::first_violation(root) {
            return Err(Error::ParseFailed {
                position: positions.resolve(bad.start_byte()),
                message,
            });
        }

        let mut cursor = root.walk();
        let nodes = root
            .named_children(&mut cursor)
            .map(|child| match child.kind() {
                "function_declaration" | "method_declaration" => {
                    Node::FunctionDeclaration(Self::lower_function(&child, source))
                }
                kind => Node::Other {
                    kind: kind.to_string(),
                },
            })
            .collect();

        Ok(SyntaxTree {
            path: file_path.to_path_buf(),
            nodes,
            positions,
        })
    }
}
