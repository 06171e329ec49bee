//! Identity module - content-addressed document identifiers

use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters of the SHA-256 digest kept in a [`DocumentId`] (64 bits)
pub const DIGEST_PREFIX_LEN: usize = 16;

/// Stable identifier for a document, derived from its file name and content
///
/// The textual form is `"<file_name>-<digest prefix>"`, where the prefix is the
/// first [`DIGEST_PREFIX_LEN`] hex characters of `SHA-256(file_name || bytes)`.
/// Identical `(file_name, bytes)` pairs always produce the same id, which makes
/// re-processing a document an overwrite rather than a duplicate.
///
/// The 64-bit prefix is a readability tradeoff: collisions are negligible at
/// the corpus sizes this pipeline handles, but the id is not meant to resist
/// adversarial inputs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Derive the id for a file name and its content
    ///
    /// # Examples
    ///
    /// ```
    /// use lastenboek_domain::DocumentId;
    ///
    /// let id = DocumentId::derive("spec1.pdf", b"%PDF-1.4");
    /// assert!(id.as_str().starts_with("spec1.pdf-"));
    /// assert_eq!(id.digest_prefix().len(), 16);
    /// ```
    pub fn derive(file_name: &str, file_bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(file_name.as_bytes());
        hasher.update(file_bytes);
        let digest = hex::encode(hasher.finalize());

        Self(format!("{}-{}", file_name, &digest[..DIGEST_PREFIX_LEN]))
    }

    /// Wrap an id read back from storage
    ///
    /// No validation is performed; the storage layer is trusted to hand back
    /// ids this crate produced.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex digest prefix after the last `-`
    ///
    /// Empty for a raw id without a separator.
    pub fn digest_prefix(&self) -> &str {
        self.0.rsplit_once('-').map(|(_, prefix)| prefix).unwrap_or("")
    }

    /// Consume the id, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute the document id for `file_name` and `file_bytes`
///
/// Shorthand for [`DocumentId::derive`].
pub fn compute_document_id(file_name: &str, file_bytes: &[u8]) -> DocumentId {
    DocumentId::derive(file_name, file_bytes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the same inputs always give the same id
        #[test]
        fn test_deterministic(name in ".{0,40}", bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(
                compute_document_id(&name, &bytes),
                compute_document_id(&name, &bytes)
            );
        }

        /// Property: flipping one content byte changes the id
        #[test]
        fn test_content_sensitive(
            bytes in prop::collection::vec(any::<u8>(), 1..256),
            idx in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut changed = bytes.clone();
            let i = idx.index(changed.len());
            changed[i] ^= flip;

            prop_assert_ne!(
                compute_document_id("doc.pdf", &bytes),
                compute_document_id("doc.pdf", &changed)
            );
        }

        /// Property: changing the file name changes the digest prefix
        #[test]
        fn test_name_sensitive(name in "[a-z]{1,20}", suffix in "[A-Z0-9]{1,4}") {
            let other = format!("{}{}", name, suffix);
            let a = compute_document_id(&name, b"same bytes");
            let b = compute_document_id(&other, b"same bytes");
            prop_assert_ne!(a.digest_prefix(), b.digest_prefix());
        }
    }
}
