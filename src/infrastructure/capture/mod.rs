//! Consent capture infrastructure
//!
//! Cross-platform microphone capture using cpal, with consent clips
//! encoded to FLAC for compact in-memory storage and direct playback.

mod cpal_capture;
mod flac;

pub use cpal_capture::CpalConsentCapture;
pub use flac::{encode_to_flac, EncodingError, TARGET_SAMPLE_RATE};

/// Create the default capture adapter for the current platform
pub fn create_capture() -> CpalConsentCapture {
    CpalConsentCapture::new()
}
