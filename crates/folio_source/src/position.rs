//! Line/column locations within a source document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-indexed line/column location.
///
/// A `line` of `0` means the position is unknown (for example, a uid declared
/// by a generator rather than written in the source text).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Line number (1-indexed, `0` if unknown).
    pub line: u32,
    /// Column number (1-indexed, `0` if unknown).
    pub column: u32,
}

impl SourcePosition {
    /// The position used when no location is available.
    pub const UNKNOWN: SourcePosition = SourcePosition { line: 0, column: 0 };

    /// Creates a position at the given line and column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Creates a position at the start of the given line.
    pub fn line(line: u32) -> Self {
        Self { line, column: 1 }
    }

    /// Returns `true` if this position carries no location.
    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
