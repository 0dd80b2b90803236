//! Digest infrastructure for record sealing

mod sha256;

pub use sha256::Sha256Digest;
