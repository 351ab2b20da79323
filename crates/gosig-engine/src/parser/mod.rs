pub mod go_parser;
pub mod position;
pub mod registry;

pub use go_parser::GoParser;
pub use position::PositionResolver;
pub use registry::ParserRegistry;

use gosig_core::Result;
use std::path::{Path, PathBuf};

/// Trait implemented by each language-specific syntax tree provider.
pub trait LanguageParser: Send + Sync {
    /// File extensions this parser handles (without leading dot).
    fn extensions(&self) -> &[&str];

    /// Parse a whole source file into a [`SyntaxTree`].
    ///
    /// Any syntax error fails the file as a whole; no partial tree is
    /// returned.
    fn parse(&self, source: &[u8], file_path: &Path) -> Result<SyntaxTree>;
}

/// Provider-neutral view of one parsed file: its top-level declarations in
/// source order plus the resolver for turning offsets into positions.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub path: PathBuf,
    pub nodes: Vec<Node>,
    pub positions: PositionResolver,
}

/// Top-level declaration kinds. Only function declarations carry data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    FunctionDeclaration(FuncDecl),
    Other { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Byte offset of the `func` keyword.
    pub func_offset: usize,
    pub params: Option<Vec<Field>>,
    pub results: Option<Vec<Field>>,
}

/// One parameter group or result field: zero or more names sharing a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

/// A type expression as the sequence of source tokens it was written with.
/// Comments and line terminators are not tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeExpr {
    pub tokens: Vec<TypeToken>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    pub text: String,
    /// Whitespace separated this token from the previous one in the source.
    pub spaced: bool,
}
