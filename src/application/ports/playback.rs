//! Clip playback port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioClip;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio output device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to decode clip: {0}")]
    DecodeFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for playing back recorded consent clips
#[async_trait]
pub trait ClipPlayer: Send + Sync {
    /// Play a clip to completion.
    ///
    /// # Arguments
    /// * `clip` - The recorded clip to play
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError>;
}
