//! SHA-256 digest adapter

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::application::ports::{DigestError, DigestFunction};

/// SHA-256 digest implementation
pub struct Sha256Digest;

impl Sha256Digest {
    /// Create a new SHA-256 digest adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256Digest {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestFunction for Sha256Digest {
    fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError> {
        let digest = Sha256::digest(bytes);

        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            write!(hex, "{:02x}", byte).map_err(|e| DigestError::Failed(e.to_string()))?;
        }

        Ok(hex)
    }
}
