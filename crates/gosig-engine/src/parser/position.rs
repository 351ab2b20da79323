use gosig_core::Position;
use std::path::PathBuf;

/// Maps byte offsets within one file to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionResolver {
    path: PathBuf,
    /// Byte offset at which each line starts; always begins with 0.
    line_starts: Vec<usize>,
}

impl PositionResolver {
    pub fn new(path: impl Into<PathBuf>, source: &[u8]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| **b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self {
            path: path.into(),
            line_starts,
        }
    }

    pub fn resolve(&self, offset: usize) -> Position {
        // Index of the last line starting at or before `offset`.
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.line_starts[line];
        Position::new(self.path.clone(), (line + 1) as u32, (column + 1) as u32)
    }
}
