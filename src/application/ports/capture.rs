//! Consent capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioClip;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("No microphone available")]
    NoInputDevice,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("No capture in progress")]
    NotCapturing,
}

/// Port for microphone consent capture.
///
/// One capture session at a time: `start` opens the device and buffers
/// audio until `stop` finalizes a playable clip or `cancel` discards the
/// buffer. Either exit path must release the device.
#[async_trait]
pub trait ConsentCapture: Send + Sync {
    /// Open the microphone and start buffering audio.
    ///
    /// # Returns
    /// Ok(()) once capture is running; `PermissionDenied` if the platform
    /// refuses access (the caller may invoke again)
    async fn start(&self) -> Result<(), CaptureError>;

    /// Stop capturing, release the device, and finalize the buffered
    /// audio into one playable clip.
    async fn stop(&self) -> Result<AudioClip, CaptureError>;

    /// Stop capturing and discard the buffer, releasing the device.
    async fn cancel(&self) -> Result<(), CaptureError>;

    /// Whether a capture session is currently running
    fn is_capturing(&self) -> bool;
}
