//! Consent recording use case
//!
//! Drives one spoken-consent slot through its lifecycle:
//!
//!   EMPTY     -> RECORDING (start_recording)
//!   RECORDING -> POPULATED (stop_recording)
//!   RECORDING -> EMPTY     (abort)
//!   POPULATED -> EMPTY     (delete)
//!
//! Re-recording over a populated slot is not offered; the clip must be
//! deleted first. Permission denial leaves the recorder empty and
//! retriable.

use std::fmt;

use thiserror::Error;

use crate::domain::directive::ConsentRecording;

use super::ports::{CaptureError, ClipPlayer, ConsentCapture, PlaybackError};

/// Recorder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Empty,
    Recording,
    Populated,
}

impl RecorderState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Recording => "recording",
            Self::Populated => "populated",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid recorder transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidRecorderTransition {
    pub current_state: RecorderState,
    pub action: String,
}

/// Errors from the consent recording use case
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error(transparent)]
    InvalidState(#[from] InvalidRecorderTransition),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),
}

impl ConsentError {
    /// Whether this error is a microphone permission denial
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Capture(CaptureError::PermissionDenied(_)))
    }
}

/// Consent recording use case over the capture and playback ports
pub struct ConsentRecorder<C, P>
where
    C: ConsentCapture,
    P: ClipPlayer,
{
    capture: C,
    player: P,
    recording: ConsentRecording,
    is_recording: bool,
}

impl<C, P> ConsentRecorder<C, P>
where
    C: ConsentCapture,
    P: ClipPlayer,
{
    /// Create a recorder with an empty slot
    pub fn new(capture: C, player: P) -> Self {
        Self::with_recording(capture, player, ConsentRecording::empty())
    }

    /// Create a recorder seeded with an existing slot (possibly populated)
    pub fn with_recording(capture: C, player: P, recording: ConsentRecording) -> Self {
        Self {
            capture,
            player,
            recording,
            is_recording: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> RecorderState {
        if self.is_recording {
            RecorderState::Recording
        } else if self.recording.is_recorded() {
            RecorderState::Populated
        } else {
            RecorderState::Empty
        }
    }

    /// Get the consent slot
    pub fn recording(&self) -> &ConsentRecording {
        &self.recording
    }

    /// Consume the recorder and return the consent slot.
    /// A session still in progress is cancelled first so the device is
    /// never left open.
    pub async fn into_recording(mut self) -> ConsentRecording {
        self.abort().await;
        self.recording
    }

    /// Request microphone access and start a capture session.
    ///
    /// Permission denial is returned to the caller and leaves the recorder
    /// empty; invoking again retries from scratch.
    pub async fn start_recording(&mut self) -> Result<(), ConsentError> {
        match self.state() {
            RecorderState::Recording => {
                return Err(InvalidRecorderTransition {
                    current_state: RecorderState::Recording,
                    action: "start recording".to_string(),
                }
                .into());
            }
            RecorderState::Populated => {
                return Err(InvalidRecorderTransition {
                    current_state: RecorderState::Populated,
                    action: "start recording".to_string(),
                }
                .into());
            }
            RecorderState::Empty => {}
        }

        self.capture.start().await?;
        self.is_recording = true;
        Ok(())
    }

    /// Stop the capture session, finalize the clip, and populate the slot
    pub async fn stop_recording(&mut self) -> Result<(), ConsentError> {
        if !self.is_recording {
            return Err(InvalidRecorderTransition {
                current_state: self.state(),
                action: "stop recording".to_string(),
            }
            .into());
        }

        // Whatever stop() does with the buffer, the session is over and
        // the device has been released.
        self.is_recording = false;
        let clip = self.capture.stop().await?;
        self.recording = ConsentRecording::recorded(clip);
        Ok(())
    }

    /// Play back the recorded clip; no state change
    pub async fn play(&self) -> Result<(), ConsentError> {
        let clip = self.recording.clip().ok_or(InvalidRecorderTransition {
            current_state: self.state(),
            action: "play".to_string(),
        })?;
        self.player.play(clip).await?;
        Ok(())
    }

    /// Release the recorded clip, returning the slot to empty
    pub fn delete(&mut self) -> Result<(), ConsentError> {
        if !self.recording.is_recorded() || self.is_recording {
            return Err(InvalidRecorderTransition {
                current_state: self.state(),
                action: "delete".to_string(),
            }
            .into());
        }
        self.recording.clear();
        Ok(())
    }

    /// Cancel an in-progress capture session, releasing the device and
    /// discarding the buffer. No-op otherwise.
    pub async fn abort(&mut self) {
        if self.is_recording {
            self.is_recording = false;
            let _ = self.capture.cancel().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{AudioClip, ClipFormat};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct MockCapture {
        deny: bool,
        running: AtomicBool,
        cancels: Arc<AtomicUsize>,
        stops: Arc<AtomicUsize>,
    }

    impl MockCapture {
        fn denying() -> Self {
            Self {
                deny: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ConsentCapture for MockCapture {
        async fn start(&self) -> Result<(), CaptureError> {
            if self.deny {
                return Err(CaptureError::PermissionDenied("denied by user".into()));
            }
            self.running.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<AudioClip, CaptureError> {
            if !self.running.swap(false, Ordering::SeqCst) {
                return Err(CaptureError::NotCapturing);
            }
            let n = self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(AudioClip::new(vec![n as u8 + 1; 4], ClipFormat::Flac))
        }

        async fn cancel(&self) -> Result<(), CaptureError> {
            self.running.store(false, Ordering::SeqCst);
            self.cancels.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn is_capturing(&self) -> bool {
            self.running.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct MockPlayer {
        plays: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ClipPlayer for MockPlayer {
        async fn play(&self, _clip: &AudioClip) -> Result<(), PlaybackError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn recorder() -> ConsentRecorder<MockCapture, MockPlayer> {
        ConsentRecorder::new(MockCapture::default(), MockPlayer::default())
    }

    #[tokio::test]
    async fn full_cycle_populates_the_slot() {
        let mut rec = recorder();
        assert_eq!(rec.state(), RecorderState::Empty);

        rec.start_recording().await.unwrap();
        assert_eq!(rec.state(), RecorderState::Recording);

        rec.stop_recording().await.unwrap();
        assert_eq!(rec.state(), RecorderState::Populated);
        assert!(rec.recording().is_recorded());
    }

    #[tokio::test]
    async fn delete_then_rerecord_produces_a_fresh_clip() {
        let mut rec = recorder();
        rec.start_recording().await.unwrap();
        rec.stop_recording().await.unwrap();
        let first = rec.recording().clip().unwrap().data().to_vec();

        rec.delete().unwrap();
        assert_eq!(rec.state(), RecorderState::Empty);
        assert!(rec.recording().clip().is_none());

        rec.start_recording().await.unwrap();
        rec.stop_recording().await.unwrap();
        let second = rec.recording().clip().unwrap().data().to_vec();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn rerecording_over_a_populated_slot_is_refused() {
        let mut rec = recorder();
        rec.start_recording().await.unwrap();
        rec.stop_recording().await.unwrap();

        let err = rec.start_recording().await.unwrap_err();
        assert!(matches!(err, ConsentError::InvalidState(_)));
        assert_eq!(rec.state(), RecorderState::Populated);
    }

    #[tokio::test]
    async fn start_while_recording_is_refused() {
        let mut rec = recorder();
        rec.start_recording().await.unwrap();
        let err = rec.start_recording().await.unwrap_err();
        assert!(err.to_string().contains("recording"));
    }

    #[tokio::test]
    async fn stop_without_start_is_refused() {
        let mut rec = recorder();
        let err = rec.stop_recording().await.unwrap_err();
        assert!(matches!(err, ConsentError::InvalidState(_)));
    }

    #[tokio::test]
    async fn permission_denial_leaves_the_recorder_usable() {
        let mut rec = ConsentRecorder::new(MockCapture::denying(), MockPlayer::default());
        let err = rec.start_recording().await.unwrap_err();
        assert!(err.is_permission_denied());
        assert_eq!(rec.state(), RecorderState::Empty);

        // The user may try again; a granting device then succeeds
        let mut rec = recorder();
        rec.start_recording().await.unwrap();
        assert_eq!(rec.state(), RecorderState::Recording);
    }

    #[tokio::test]
    async fn play_requires_a_populated_slot() {
        let rec = recorder();
        assert!(rec.play().await.is_err());
    }

    #[tokio::test]
    async fn play_does_not_change_state() {
        let plays = Arc::new(AtomicUsize::new(0));
        let player = MockPlayer {
            plays: Arc::clone(&plays),
        };
        let mut rec = ConsentRecorder::new(MockCapture::default(), player);
        rec.start_recording().await.unwrap();
        rec.stop_recording().await.unwrap();

        rec.play().await.unwrap();
        rec.play().await.unwrap();
        assert_eq!(plays.load(Ordering::SeqCst), 2);
        assert_eq!(rec.state(), RecorderState::Populated);
    }

    #[tokio::test]
    async fn delete_on_empty_is_refused() {
        let mut rec = recorder();
        assert!(rec.delete().is_err());
    }

    #[tokio::test]
    async fn abort_releases_a_live_session() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let capture = MockCapture {
            cancels: Arc::clone(&cancels),
            ..Default::default()
        };
        let mut rec = ConsentRecorder::new(capture, MockPlayer::default());
        rec.start_recording().await.unwrap();

        rec.abort().await;
        assert_eq!(rec.state(), RecorderState::Empty);
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn into_recording_cancels_a_live_session() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let capture = MockCapture {
            cancels: Arc::clone(&cancels),
            ..Default::default()
        };
        let mut rec = ConsentRecorder::new(capture, MockPlayer::default());
        rec.start_recording().await.unwrap();

        let recording = rec.into_recording().await;
        assert!(!recording.is_recorded());
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn seeded_recorder_reports_populated() {
        let clip = AudioClip::new(vec![9u8; 4], ClipFormat::Flac);
        let rec = ConsentRecorder::with_recording(
            MockCapture::default(),
            MockPlayer::default(),
            ConsentRecording::recorded(clip),
        );
        assert_eq!(rec.state(), RecorderState::Populated);
    }
}
