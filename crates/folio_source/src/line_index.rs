//! Line-start indexing for turning byte offsets into line/column positions.

use crate::position::SourcePosition;
use folio_common::{FolioResult, InternalError};

/// Precomputed line-start offsets for one document's text.
///
/// Link extractors work on byte offsets; `LineIndex` converts them into the
/// [`SourcePosition`]s recorded in link sources and uid definitions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Indexes the line starts of `text`.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self {
            line_starts,
            len: text.len() as u32,
        }
    }

    /// Returns the number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into a 1-indexed position.
    ///
    /// An offset equal to the text length (end of input) is valid. Anything
    /// past it means the caller computed offsets against different text.
    pub fn position(&self, byte_offset: u32) -> FolioResult<SourcePosition> {
        if byte_offset > self.len {
            return Err(InternalError::new(format!(
                "byte offset {byte_offset} is past end of text ({} bytes)",
                self.len
            )));
        }
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let column = byte_offset - self.line_starts[line_idx] + 1;
        Ok(SourcePosition::new(line, column))
    }
}
