//! Record sealing use case
//!
//! Serializes the directive and asks the digest collaborator for a
//! content hash, rendered as a display-only "sealed record" receipt.
//! Nothing is persisted or verified against it.

use thiserror::Error;

use crate::domain::directive::DirectiveForm;

use super::ports::{DigestError, DigestFunction};

/// Fixed prefix on the rendered hash
pub const SEAL_MARKER: &str = "0x";

/// Errors from sealing
#[derive(Debug, Clone, Error)]
pub enum SealError {
    #[error("Failed to serialize directive: {0}")]
    Serialize(String),

    #[error(transparent)]
    Digest(#[from] DigestError),
}

/// The sealed-record display artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedRecord {
    hash: String,
}

impl SealedRecord {
    /// Get the marker-prefixed hex hash
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

/// Seal a directive: serialize it and digest the bytes.
pub fn seal_directive<D: DigestFunction>(
    digest: &D,
    form: &DirectiveForm,
) -> Result<SealedRecord, SealError> {
    let bytes = serde_json::to_vec(form).map_err(|e| SealError::Serialize(e.to_string()))?;
    let hex = digest.digest_hex(&bytes)?;
    Ok(SealedRecord {
        hash: format!("{}{}", SEAL_MARKER, hex),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingDigest;

    impl DigestFunction for CountingDigest {
        fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError> {
            Ok(format!("{:08x}", bytes.len()))
        }
    }

    struct FailingDigest;

    impl DigestFunction for FailingDigest {
        fn digest_hex(&self, _bytes: &[u8]) -> Result<String, DigestError> {
            Err(DigestError::Failed("broken".into()))
        }
    }

    #[test]
    fn sealed_hash_carries_the_marker() {
        let record = seal_directive(&CountingDigest, &DirectiveForm::new()).unwrap();
        assert!(record.hash().starts_with(SEAL_MARKER));
    }

    #[test]
    fn sealing_is_deterministic_for_the_same_form() {
        let form = DirectiveForm::new();
        let a = seal_directive(&CountingDigest, &form).unwrap();
        let b = seal_directive(&CountingDigest, &form).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn editing_the_form_changes_the_digested_bytes() {
        let mut form = DirectiveForm::new();
        let before = seal_directive(&CountingDigest, &form).unwrap();

        form.personal_info.surname = "Ahn".into();
        let after = seal_directive(&CountingDigest, &form).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn digest_failure_surfaces() {
        let err = seal_directive(&FailingDigest, &DirectiveForm::new()).unwrap_err();
        assert!(matches!(err, SealError::Digest(_)));
    }
}
