//! Cross-reference identifiers exported by a document.

use crate::position::SourcePosition;
use serde::{Deserialize, Serialize};

/// A uid a document declares, together with where it is declared.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct UidDefinition {
    uid: String,
    file: String,
    position: SourcePosition,
    path: Option<String>,
}

impl UidDefinition {
    /// Creates a definition of `uid` declared in `file` at `position`.
    pub fn new(uid: impl Into<String>, file: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            uid: uid.into(),
            file: file.into(),
            position,
            path: None,
        }
    }

    /// Returns a copy carrying the structural path of the declaration inside
    /// the document (e.g. `items[2]` in reference YAML).
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The exported identifier.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The file declaring the uid.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Where the uid is declared.
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Structural path of the declaration, if known.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
