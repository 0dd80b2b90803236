//! Digest port interface

use thiserror::Error;

/// Digest errors
#[derive(Debug, Clone, Error)]
pub enum DigestError {
    #[error("Digest computation failed: {0}")]
    Failed(String),
}

/// Port for the cryptographic digest collaborator.
///
/// Takes bytes, returns a fixed-length lowercase hex digest. Used only to
/// produce the display-only sealed-record artifact.
pub trait DigestFunction: Send + Sync {
    /// Compute the digest of `bytes` as a lowercase hex string
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError>;
}

/// Blanket implementation for boxed digest types
impl DigestFunction for Box<dyn DigestFunction> {
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError> {
        self.as_ref().digest_hex(bytes)
    }
}
