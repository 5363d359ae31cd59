//! Common result and error types for the folio pipeline.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a broken internal invariant (a bug in a pipeline stage),
/// not a user-facing problem with the documentation sources.
pub type FolioResult<T> = Result<T, InternalError>;

/// An internal error indicating a logic bug, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("observer registry corrupted");
        assert_eq!(
            format!("{err}"),
            "internal error: observer registry corrupted"
        );
    }

    #[test]
    fn err_path() {
        let r: FolioResult<i32> = Err(InternalError::new("test error"));
        let err = r.err().unwrap();
        assert_eq!(err.message, "test error");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
