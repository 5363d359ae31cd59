//! Recorded locations of outgoing references.

use crate::position::SourcePosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One place in a document where another file or uid is referenced.
///
/// Several `LinkSourceInfo` values may point at the same target; callers keep
/// them in first-seen order so link errors are reported deterministically.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LinkSourceInfo {
    target: String,
    anchor: Option<String>,
    source_file: String,
    position: SourcePosition,
}

impl LinkSourceInfo {
    /// Creates a link source for `target` found in `source_file` at `position`.
    pub fn new(
        target: impl Into<String>,
        source_file: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        Self {
            target: target.into(),
            anchor: None,
            source_file: source_file.into(),
            position,
        }
    }

    /// Returns a copy carrying the given anchor (the `#fragment` part of a link).
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// The referenced file key or uid.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The anchor within the target, if the link carried one.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// The file containing the reference.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Where in `source_file` the reference occurs.
    pub fn position(&self) -> SourcePosition {
        self.position
    }
}

impl fmt::Display for LinkSourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_file, self.position)
    }
}
