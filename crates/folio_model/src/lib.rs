//! The per-document state record of the documentation build pipeline.
//!
//! A [`FileModel`] tracks one source document through parsing, link
//! extraction, cross-reference resolution, and incremental rebuilds. Its
//! identity and exported uids change only through notifying mutators, so
//! stages that index documents by path or uid can subscribe through
//! [`Observers`] and stay consistent.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod file_model;
pub mod metadata;

pub use error::{ModelError, ObserverError};
pub use event::{
    Dispatch, IdentityChanged, ModelEvent, ObserverFailure, ObserverId, Observers, UidsChanged,
};
pub use file_model::{FileModel, FileModelBuilder, LinkSourceMap};
pub use metadata::{Metadata, MetadataValue};
