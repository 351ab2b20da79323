use super::{LanguageParser, SyntaxTree};
use gosig_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Central registry that maps file extensions to their syntax tree providers.
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn LanguageParser>>,
}

impl ParserRegistry {
    /// Create a new registry with the Go parser registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(super::go_parser::GoParser::new()));
        registry
    }

    /// A registry that recognises no files at all.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register `parser` for every extension it reports, replacing any
    /// previous parser for those extensions.
    pub fn register(&mut self, parser: Arc<dyn LanguageParser>) {
        for ext in parser.extensions() {
            self.parsers.insert(ext.to_string(), Arc::clone(&parser));
        }
    }

    /// Return `true` if the file extension is handled by a registered parser.
    pub fn supports_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.parsers.contains_key(ext))
            .unwrap_or(false)
    }

    /// Parse a source file, selecting the parser by file extension.
    ///
    /// Returns `Error::UnsupportedLanguage` when no parser is registered for
    /// the extension (or the path has no extension).
    pub fn parse_file(&self, path: &Path, source: &[u8]) -> Result<SyntaxTree> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedLanguage("no extension".into()))?;

        let parser = self
            .parsers
            .get(ext)
            .ok_or_else(|| Error::UnsupportedLanguage(ext.into()))?;

        parser.parse(source, path)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
