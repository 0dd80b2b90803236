//! Cross-platform consent capture using cpal
//!
//! Speech-optimized settings:
//! - 16kHz sample rate (or resampling from device rate)
//! - Mono channel
//! - FLAC encoding via the clip encoder

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::time::Duration as TokioDuration;

use super::flac::{encode_to_flac, TARGET_SAMPLE_RATE};
use crate::application::ports::{CaptureError, ConsentCapture};
use crate::domain::audio::{AudioClip, ClipFormat};

/// Consent capture adapter using cpal.
///
/// The stream is managed on a dedicated thread to avoid Send/Sync issues
/// with cpal::Stream which is not thread-safe; the thread exits (and the
/// device is released) whenever the capturing flag drops, including from
/// `Drop`, so a discarded adapter never holds the microphone open.
pub struct CpalConsentCapture {
    /// Captured audio samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate (may differ from target 16kHz)
    device_sample_rate: Arc<AtomicU32>,
    /// Capture state
    is_capturing: Arc<AtomicBool>,
    /// Error raised while opening the device, reported back from `start`
    start_error: Arc<StdMutex<Option<CaptureError>>>,
}

impl CpalConsentCapture {
    /// Create a new cpal-based capture adapter
    pub fn new() -> Self {
        Self {
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
            start_error: Arc::new(StdMutex::new(None)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(CaptureError::NoInputDevice)
    }

    /// Map a device/stream failure onto the capture error taxonomy.
    /// Platforms report microphone permission refusals as open failures,
    /// so those are surfaced as `PermissionDenied`.
    fn classify_open_failure(message: String) -> CaptureError {
        let lower = message.to_lowercase();
        if lower.contains("denied")
            || lower.contains("permission")
            || lower.contains("not authorized")
        {
            CaptureError::PermissionDenied(message)
        } else {
            CaptureError::StartFailed(message)
        }
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| Self::classify_open_failure(format!("Failed to get configs: {}", e)))?;

        // Prefer mono and configs that include the 16kHz target rate
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(CaptureError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = if config_range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Resample audio from device rate to 16kHz if needed
    fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, CaptureError> {
        if source_rate == TARGET_SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            TARGET_SAMPLE_RATE as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| CaptureError::CaptureFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();

            // Pad the tail chunk to the resampler's frame size
            if chunk.len() < frames_needed {
                chunk.resize(frames_needed, 0.0);
            }

            let resampled = resampler
                .process(&[chunk], None)
                .map_err(|e| CaptureError::CaptureFailed(format!("Resampling failed: {}", e)))?;

            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
            input_pos = end_pos;
        }

        output.truncate(output_len);

        Ok(output)
    }

    /// Mix stereo to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Encode PCM samples to a FLAC consent clip
    fn encode_clip(samples: &[i16], sample_rate: u32) -> Result<AudioClip, CaptureError> {
        let resampled = Self::resample_to_16k(samples, sample_rate)?;

        let flac_data = encode_to_flac(&resampled)
            .map_err(|e| CaptureError::CaptureFailed(format!("Encoding failed: {}", e)))?;

        if flac_data.is_empty() {
            return Err(CaptureError::CaptureFailed("Encoded clip is empty".into()));
        }

        Ok(AudioClip::new(flac_data, ClipFormat::Flac))
    }

    /// Run the capture loop on its own thread until the flag drops
    fn spawn_capture_thread(&self) {
        let audio_buffer = Arc::clone(&self.audio_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);
        let start_error = Arc::clone(&self.start_error);

        std::thread::spawn(move || {
            let fail = |err: CaptureError| {
                if let Ok(mut slot) = start_error.lock() {
                    *slot = Some(err);
                }
                is_capturing.store(false, Ordering::SeqCst);
            };

            let device = match CpalConsentCapture::get_input_device() {
                Ok(d) => d,
                Err(e) => return fail(e),
            };

            let (config, sample_format) = match CpalConsentCapture::get_input_config(&device) {
                Ok(c) => c,
                Err(e) => return fail(e),
            };

            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            let stream_result = match sample_format {
                SampleFormat::I16 => {
                    let audio_buffer = Arc::clone(&audio_buffer);
                    let is_capturing = Arc::clone(&is_capturing);

                    device.build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if is_capturing.load(Ordering::SeqCst) {
                                let mono = CpalConsentCapture::stereo_to_mono(data, channels);
                                if let Ok(mut buffer) = audio_buffer.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                SampleFormat::F32 => {
                    let audio_buffer = Arc::clone(&audio_buffer);
                    let is_capturing = Arc::clone(&is_capturing);

                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if is_capturing.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalConsentCapture::stereo_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = audio_buffer.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                _ => {
                    return fail(CaptureError::StartFailed(
                        "Unsupported sample format".into(),
                    ))
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => return fail(Self::classify_open_failure(e.to_string())),
            };

            if let Err(e) = stream.play() {
                return fail(Self::classify_open_failure(e.to_string()));
            }

            // Keep the stream alive until stop/cancel/teardown drops the flag
            while is_capturing.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            drop(stream);
        });
    }
}

impl Default for CpalConsentCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CpalConsentCapture {
    fn drop(&mut self) {
        // The capture thread exits and releases the device when the flag
        // drops, so teardown mid-session leaves no dangling device lock.
        self.is_capturing.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConsentCapture for CpalConsentCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }

        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }
        {
            let mut slot = self.start_error.lock().unwrap();
            *slot = None;
        }

        self.is_capturing.store(true, Ordering::SeqCst);
        self.spawn_capture_thread();

        // Give the thread a moment to open the device
        tokio::time::sleep(TokioDuration::from_millis(50)).await;

        if !self.is_capturing.load(Ordering::SeqCst) {
            let err = self
                .start_error
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| CaptureError::StartFailed("Failed to start capture".into()));
            return Err(err);
        }

        Ok(())
    }

    async fn stop(&self) -> Result<AudioClip, CaptureError> {
        if !self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::NotCapturing);
        }

        self.is_capturing.store(false, Ordering::SeqCst);

        // Give the thread a moment to drop the stream
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::CaptureFailed("Sample rate not set".into()));
        }

        let samples = {
            let mut buffer = self.audio_buffer.lock().unwrap();
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(CaptureError::CaptureFailed(
                "No audio data captured".to_string(),
            ));
        }

        // Resampling and FLAC encoding are CPU-bound
        tokio::task::spawn_blocking(move || Self::encode_clip(&samples, sample_rate))
            .await
            .map_err(|e| CaptureError::CaptureFailed(format!("Encode task error: {}", e)))?
    }

    async fn cancel(&self) -> Result<(), CaptureError> {
        self.is_capturing.store(false, Ordering::SeqCst);

        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalConsentCapture::stereo_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn stereo_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalConsentCapture::stereo_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // Average of each pair
    }

    #[test]
    fn resample_identity_at_target_rate() {
        let samples = vec![1i16, 2, 3, 4];
        let result = CpalConsentCapture::resample_to_16k(&samples, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(result, samples);
    }

    #[test]
    fn permission_failures_are_classified() {
        let err = CpalConsentCapture::classify_open_failure("Access denied by user".into());
        assert!(matches!(err, CaptureError::PermissionDenied(_)));

        let err = CpalConsentCapture::classify_open_failure("device busy".into());
        assert!(matches!(err, CaptureError::StartFailed(_)));
    }

    #[test]
    fn adapter_default_state() {
        let capture = CpalConsentCapture::new();
        assert!(!capture.is_capturing());
    }

    #[tokio::test]
    async fn stop_without_start_reports_not_capturing() {
        let capture = CpalConsentCapture::new();
        let err = capture.stop().await.unwrap_err();
        assert!(matches!(err, CaptureError::NotCapturing));
    }

    #[test]
    fn encode_clip_produces_flac() {
        let samples = vec![0i16; TARGET_SAMPLE_RATE as usize / 10];
        let clip = CpalConsentCapture::encode_clip(&samples, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(clip.format(), ClipFormat::Flac);
        assert_eq!(&clip.data()[0..4], b"fLaC");
    }
}
