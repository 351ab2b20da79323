pub mod aggregate;
pub mod extract;
pub mod parser;
pub mod processor;
pub mod walker;

pub use aggregate::{Aggregator, RootConfig, RootReport};
pub use extract::extract;
pub use processor::{FileOutcome, FileProcessor, FileResult};
pub use walker::{RootWalk, SkippedFile, TreeWalker};
