use gosig_core::{Error, Result, Signature};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::processor::{FileOutcome, FileProcessor};

/// A source file that contributed nothing, and why.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: Error,
}

/// Everything collected under one root.
#[derive(Debug)]
pub struct RootWalk {
    pub root: PathBuf,
    /// Signatures in file-visitation order; in-file order is preserved.
    pub signatures: Vec<Signature>,
    /// Source files handed to the processor, skipped ones included.
    pub files_visited: usize,
    pub skipped: Vec<SkippedFile>,
}

impl RootWalk {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            signatures: Vec::new(),
            files_visited: 0,
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, path: PathBuf, reason: Error) {
        tracing::warn!(path = %path.display(), error = %reason, "skipping");
        self.skipped.push(SkippedFile { path, reason });
    }
}

/// Recursively walks one root, feeding every source file to a [`FileProcessor`].
pub struct TreeWalker {
    processor: FileProcessor,
}

impl TreeWalker {
    pub fn new(processor: FileProcessor) -> Self {
        Self { processor }
    }

    /// Walk `root` and collect the signatures of every source file below it.
    ///
    /// Fails only when `root` itself cannot be listed. Unreadable entries
    /// and unparsable files below it end up in [`RootWalk::skipped`].
    pub fn walk(&self, root: &Path) -> Result<RootWalk> {
        std::fs::read_dir(root).map_err(|source| Error::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

        let mut walk = RootWalk::new(root);

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    walk.skip(
                        path.clone(),
                        Error::FileUnreadable {
                            path,
                            source: err.into(),
                        },
                    );
                    continue;
                }
            };

            // Links to directories are not followed, whatever their name.
            let is_dir = entry.file_type().is_dir()
                || (entry.path_is_symlink() && entry.path().is_dir());
            if is_dir || !self.processor.registry().supports_file(entry.path()) {
                continue;
            }

            let result = self.processor.process(entry.path());
            walk.files_visited += 1;
            match result.outcome {
                FileOutcome::Ok => walk.signatures.extend(result.signatures),
                FileOutcome::Skipped(reason) => walk.skip(entry.into_path(), reason),
            }
        }

        tracing::info!(
            root = %root.display(),
            files = walk.files_visited,
            signatures = walk.signatures.len(),
            skipped = walk.skipped.len(),
            "walk complete"
        );
        Ok(walk)
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new(FileProcessor::default())
    }
}
