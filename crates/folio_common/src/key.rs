//! Canonical document keys.
//!
//! A key is the relocation-independent identity of a document within a build:
//! its original relative path, always prefixed with [`ROOT_MARKER`].

/// Prefix carried by every canonical document key.
pub const ROOT_MARKER: &str = "~/";

/// Returns `true` if `key` already starts with [`ROOT_MARKER`].
pub fn is_canonical_key(key: &str) -> bool {
    key.starts_with(ROOT_MARKER)
}

/// Derives the canonical key for a relative path.
///
/// Paths that already start with the marker are returned verbatim, so the
/// operation is idempotent.
pub fn normalize_key(relative_path: &str) -> String {
    if is_canonical_key(relative_path) {
        relative_path.to_string()
    } else {
        format!("{ROOT_MARKER}{relative_path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_plain_path() {
        assert_eq!(normalize_key("a/b.md"), "~/a/b.md");
    }

    #[test]
    fn idempotent_on_marked_path() {
        assert_eq!(normalize_key("~/a/b.md"), "~/a/b.md");
        assert_eq!(normalize_key(&normalize_key("a/b.md")), "~/a/b.md");
    }

    #[test]
    fn tilde_without_slash_is_not_a_marker() {
        assert_eq!(normalize_key("~a.md"), "~/~a.md");
    }

    #[test]
    fn empty_path() {
        assert_eq!(normalize_key(""), "~/");
        assert!(!is_canonical_key(""));
    }
}
