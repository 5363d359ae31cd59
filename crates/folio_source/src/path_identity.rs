//! The location and classification of a source document.

use crate::document_type::DocumentType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A document's base directory, path relative to that directory, and type.
///
/// `PathIdentity` is immutable. Relocating a document produces a new identity
/// through [`with_base_dir`](Self::with_base_dir) or [`with_file`](Self::with_file);
/// the document type always carries over unchanged.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PathIdentity {
    base_dir: String,
    file: String,
    doc_type: DocumentType,
}

impl PathIdentity {
    /// Creates a new identity. `file` is interpreted relative to `base_dir`.
    ///
    /// Neither path is checked against the filesystem.
    pub fn new(base_dir: impl Into<String>, file: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            base_dir: base_dir.into(),
            file: file.into(),
            doc_type,
        }
    }

    /// The directory `file` is relative to.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// The path relative to [`base_dir`](Self::base_dir).
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The document type.
    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    /// Returns a copy with the base directory replaced.
    pub fn with_base_dir(&self, base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            file: self.file.clone(),
            doc_type: self.doc_type,
        }
    }

    /// Returns a copy with the relative path replaced.
    pub fn with_file(&self, file: impl Into<String>) -> Self {
        Self {
            base_dir: self.base_dir.clone(),
            file: file.into(),
            doc_type: self.doc_type,
        }
    }

    /// Joins the base directory and relative path.
    pub fn full_path(&self) -> PathBuf {
        PathBuf::from(&self.base_dir).join(&self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> PathIdentity {
        PathIdentity::new("src", "docs/a.md", DocumentType::Article)
    }

    #[test]
    fn with_base_dir_is_targeted() {
        let p = article();
        let moved = p.with_base_dir("out");
        assert_eq!(moved.base_dir(), "out");
        assert_eq!(moved.file(), p.file());
        assert_eq!(moved.doc_type(), DocumentType::Article);
        // The source identity is untouched.
        assert_eq!(p.base_dir(), "src");
    }

    #[test]
    fn with_file_is_targeted() {
        let p = article();
        let renamed = p.with_file("docs/b.md");
        assert_eq!(renamed.file(), "docs/b.md");
        assert_eq!(renamed.base_dir(), "src");
        assert_eq!(renamed.doc_type(), DocumentType::Article);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(article(), article());
        assert_ne!(article(), article().with_base_dir("out"));
        assert_eq!(article().with_base_dir("src"), article());
    }

    #[test]
    fn full_path_joins() {
        assert_eq!(article().full_path(), PathBuf::from("src/docs/a.md"));
    }

    #[test]
    fn serde_roundtrip() {
        let p = PathIdentity::new("api", "toc.yml", DocumentType::Toc);
        let json = serde_json::to_string(&p).unwrap();
        let back: PathIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
