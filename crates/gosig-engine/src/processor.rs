use gosig_core::{Error, Signature};
use std::path::Path;

use crate::extract::extract;
use crate::parser::ParserRegistry;

/// How a single file fared. A skipped file contributes no signatures.
#[derive(Debug)]
pub enum FileOutcome {
    Ok,
    Skipped(Error),
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[derive(Debug)]
pub struct FileResult {
    pub signatures: Vec<Signature>,
    pub outcome: FileOutcome,
}

impl FileResult {
    fn skipped(reason: Error) -> Self {
        Self {
            signatures: Vec::new(),
            outcome: FileOutcome::Skipped(reason),
        }
    }
}

/// Reads, parses, and extracts one file at a time.
pub struct FileProcessor {
    registry: ParserRegistry,
}

impl FileProcessor {
    pub fn new(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Read `path` and extract its signatures. Read and parse failures are
    /// reported through [`FileOutcome::Skipped`], never as an `Err`.
    pub fn process(&self, path: &Path) -> FileResult {
        match std::fs::read(path) {
            Ok(source) => self.process_source(path, &source),
            Err(source) => FileResult::skipped(Error::FileUnreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Same as [`process`](Self::process) for contents already in memory.
    pub fn process_source(&self, path: &Path, source: &[u8]) -> FileResult {
        match self.registry.parse_file(path, source) {
            Ok(tree) => {
                let signatures = extract(&tree);
                tracing::debug!(path = %path.display(), count = signatures.len(), "extracted signatures");
                FileResult {
                    signatures,
                    outcome: FileOutcome::Ok,
                }
            }
            Err(e) => FileResult::skipped(e),
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(ParserRegistry::new())
    }
}
