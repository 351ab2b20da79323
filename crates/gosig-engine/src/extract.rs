//! Signature extraction over a parsed [`SyntaxTree`].

use gosig_core::Signature;

use crate::parser::{Field, FuncDecl, Node, SyntaxTree, TypeExpr};

/// Extract one [`Signature`] per function declaration, in source order.
///
/// Never fails: a tree without function declarations yields an empty vector.
pub fn extract(tree: &SyntaxTree) -> Vec<Signature> {
    tree.nodes
        .iter()
        .filter_map(|node| match node {
            Node::FunctionDeclaration(decl) => Some(signature_of(tree, decl)),
            Node::Other { .. } => None,
        })
        .collect()
}

fn signature_of(tree: &SyntaxTree, decl: &FuncDecl) -> Signature {
    Signature {
        position: tree.positions.resolve(decl.func_offset),
        inputs: expand_fields(decl.params.as_deref()),
        outputs: expand_fields(decl.results.as_deref()),
    }
}

/// One entry per declared name; an unnamed field still counts once.
fn expand_fields(fields: Option<&[Field]>) -> Vec<String> {
    let Some(fields) = fields else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for field in fields {
        let rendered = render_field(field);
        let arity = field.names.len().max(1);
        out.extend(std::iter::repeat(rendered).take(arity));
    }
    out
}

fn render_field(field: &Field) -> String {
    let text = render_type(&field.ty);
    if field.variadic {
        format!("...{text}")
    } else {
        text
    }
}

/// Render a type from its tokens in canonical spacing: a single space where
/// two words touch, and otherwise only where the source had whitespace and
/// the neighbouring punctuation does not bind tightly. Comments and line
/// breaks therefore never reach the output.
pub fn render_type(ty: &TypeExpr) -> String {
    let mut out = String::new();
    for token in &ty.tokens {
        let (Some(prev), Some(next)) = (out.chars().next_back(), token.text.chars().next()) else {
            out.push_str(&token.text);
            continue;
        };
        let words_touch = is_word_char(prev) && is_word_char(next);
        let loose = token.spaced && !"[(*.".contains(prev) && !"]),.".contains(next);
        if words_touch || loose {
            out.push(' ');
        }
        out.push_str(&token.text);
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
