//! Immutable value types describing where documents live and what they reference.
//!
//! This crate provides [`PathIdentity`] (a document's base directory, relative
//! path, and [`DocumentType`]), [`UidDefinition`] for exported cross-reference
//! identifiers, [`LinkSourceInfo`] for the places a document links elsewhere,
//! and [`LineIndex`] for turning byte offsets into [`SourcePosition`]s.

#![warn(missing_docs)]

pub mod document_type;
pub mod line_index;
pub mod link_source;
pub mod path_identity;
pub mod position;
pub mod uid_definition;

pub use document_type::{DocumentType, ParseDocumentTypeError};
pub use line_index::LineIndex;
pub use link_source::LinkSourceInfo;
pub use path_identity::PathIdentity;
pub use position::SourcePosition;
pub use uid_definition::UidDefinition;
