//! Configuration types deserialized from `folio.toml`.

use folio_source::{DocumentType, PathIdentity};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The top-level project configuration parsed from `folio.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata and directories.
    pub project: ProjectMeta,
    /// How source files are classified into document types.
    #[serde(default)]
    pub documents: DocumentsConfig,
}

/// Core project metadata required in every `folio.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Directory containing the documentation sources.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Directory the build writes output to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_source_dir() -> String {
    ".".to_string()
}

fn default_output_dir() -> String {
    "_site".to_string()
}

/// Mapping from file extension to [`DocumentType`].
#[derive(Debug, Deserialize)]
pub struct DocumentsConfig {
    /// Type assigned to files whose extension has no mapping.
    #[serde(default = "default_document_type")]
    pub default: DocumentType,
    /// Extension (without the dot, case-insensitive) to document type.
    #[serde(default = "default_extensions")]
    pub extensions: BTreeMap<String, DocumentType>,
}

fn default_document_type() -> DocumentType {
    DocumentType::Resource
}

fn default_extensions() -> BTreeMap<String, DocumentType> {
    BTreeMap::from([
        ("md".to_string(), DocumentType::Article),
        ("yml".to_string(), DocumentType::Article),
        ("yaml".to_string(), DocumentType::Article),
    ])
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            default: default_document_type(),
            extensions: default_extensions(),
        }
    }
}

impl DocumentsConfig {
    /// Classifies a file by its extension.
    ///
    /// Files named `toc.md`/`toc.yml` are always [`DocumentType::Toc`].
    pub fn classify(&self, file: &str) -> DocumentType {
        let path = Path::new(file);
        let stem = path.file_stem().and_then(|s| s.to_str());
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        if stem.is_some_and(|s| s.eq_ignore_ascii_case("toc"))
            && matches!(ext.as_deref(), Some("md" | "yml" | "yaml"))
        {
            return DocumentType::Toc;
        }
        ext.and_then(|ext| self.extensions.get(&ext).copied())
            .unwrap_or(self.default)
    }
}

impl ProjectConfig {
    /// Classifies a source file relative to the source directory.
    pub fn classify(&self, file: &str) -> DocumentType {
        self.documents.classify(file)
    }

    /// Builds the loader identity for a file relative to the source directory.
    pub fn identity_for(&self, file: &str) -> PathIdentity {
        PathIdentity::new(self.project.source_dir.clone(), file, self.classify(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_classification() {
        let docs = DocumentsConfig::default();
        assert_eq!(docs.classify("docs/a.md"), DocumentType::Article);
        assert_eq!(docs.classify("api/Foo.YML"), DocumentType::Article);
        assert_eq!(docs.classify("images/logo.png"), DocumentType::Resource);
        assert_eq!(docs.classify("Makefile"), DocumentType::Resource);
    }

    #[test]
    fn toc_files_detected() {
        let docs = DocumentsConfig::default();
        assert_eq!(docs.classify("toc.yml"), DocumentType::Toc);
        assert_eq!(docs.classify("guide/TOC.md"), DocumentType::Toc);
        assert_eq!(docs.classify("toc.png"), DocumentType::Resource);
    }
}
