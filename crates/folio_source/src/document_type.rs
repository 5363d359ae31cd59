//! Document-type classification of source files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a source file plays in the build.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A content page (markdown, reference YAML) processed into output.
    Article,
    /// A table-of-contents file.
    Toc,
    /// A file copied through without processing (images, downloads).
    Resource,
    /// A file whose content overwrites properties of other documents by uid.
    Overwrite,
    /// A markdown fragment attached to a reference document.
    MarkdownFragments,
}

impl DocumentType {
    /// All document types, in declaration order.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Article,
        DocumentType::Toc,
        DocumentType::Resource,
        DocumentType::Overwrite,
        DocumentType::MarkdownFragments,
    ];

    /// Returns the snake_case name used in configuration and manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Article => "article",
            DocumentType::Toc => "toc",
            DocumentType::Resource => "resource",
            DocumentType::Overwrite => "overwrite",
            DocumentType::MarkdownFragments => "markdown_fragments",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`DocumentType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type '{0}'")]
pub struct ParseDocumentTypeError(pub String);

impl FromStr for DocumentType {
    type Err = ParseDocumentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ParseDocumentTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_from_str() {
        for ty in DocumentType::ALL {
            assert_eq!(ty.to_string().parse::<DocumentType>(), Ok(ty));
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "conceptual".parse::<DocumentType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown document type 'conceptual'");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&DocumentType::MarkdownFragments).unwrap();
        assert_eq!(json, "\"markdown_fragments\"");
        let back: DocumentType = serde_json::from_str("\"toc\"").unwrap();
        assert_eq!(back, DocumentType::Toc);
    }
}
