//! Shared foundational types used across the folio documentation pipeline.
//!
//! This crate provides content hashing, the canonical document key format,
//! and common result types.

#![warn(missing_docs)]

pub mod hash;
pub mod key;
pub mod result;

pub use hash::ContentHash;
pub use key::{is_canonical_key, normalize_key, ROOT_MARKER};
pub use result::{FolioResult, InternalError};
