//! Rodio-based clip playback adapter

use std::io::Cursor;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{ClipPlayer, PlaybackError};
use crate::domain::audio::AudioClip;

/// Clip playback implementation using rodio
pub struct RodioClipPlayer;

impl RodioClipPlayer {
    /// Create a new rodio-based clip player
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioClipPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipPlayer for RodioClipPlayer {
    async fn play(&self, clip: &AudioClip) -> Result<(), PlaybackError> {
        let data = clip.data().to_vec();

        // Decoding and playback block, so run off the async runtime
        tokio::task::spawn_blocking(move || play_clip_sync(data))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

/// Play a clip synchronously (called from spawn_blocking)
fn play_clip_sync(data: Vec<u8>) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    let source =
        Decoder::new(Cursor::new(data)).map_err(|e| PlaybackError::DecodeFailed(e.to_string()))?;

    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}
