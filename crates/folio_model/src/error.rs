//! Error types for file model mutation and observer delivery.

/// Errors returned when a caller passes input that would leave a
/// [`FileModel`](crate::FileModel) inconsistent.
///
/// The model is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The same uid appears more than once in an exported uid set.
    #[error("duplicate uid '{uid}' exported by {key}")]
    DuplicateUid {
        /// Key of the document the uids were assigned to.
        key: String,
        /// The repeated uid.
        uid: String,
    },

    /// An explicit key was supplied but it is empty.
    #[error("document key must not be empty (file '{file}')")]
    EmptyKey {
        /// Relative path of the document being constructed.
        file: String,
    },
}

/// An error reported by an observer callback.
///
/// Observer errors never roll back the mutation that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ObserverError {
    /// Description of what the observer failed to do.
    pub message: String,
}

impl ObserverError {
    /// Creates a new observer error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
