//! Audio clip value object

use std::fmt;

/// Encodings a recorded consent clip may be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipFormat {
    Flac,
    Wav,
}

impl ClipFormat {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Flac => "flac",
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for ClipFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ClipFormat {
    fn default() -> Self {
        Self::Flac
    }
}

/// Value object representing one finalized consent clip.
/// Contains encoded audio bytes and their format.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    format: ClipFormat,
}

impl AudioClip {
    /// Create an AudioClip from encoded bytes
    pub fn new(data: Vec<u8>, format: ClipFormat) -> Self {
        Self { data, format }
    }

    /// Get the encoded audio bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the encoded audio bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the clip format
    pub fn format(&self) -> ClipFormat {
        self.format
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_as_str() {
        assert_eq!(ClipFormat::Flac.as_str(), "audio/flac");
        assert_eq!(ClipFormat::Wav.as_str(), "audio/wav");
    }

    #[test]
    fn format_extension() {
        assert_eq!(ClipFormat::Flac.extension(), "flac");
        assert_eq!(ClipFormat::Wav.extension(), "wav");
    }

    #[test]
    fn clip_size() {
        let clip = AudioClip::new(vec![0u8; 1024], ClipFormat::Flac);
        assert_eq!(clip.size_bytes(), 1024);
    }

    #[test]
    fn human_readable_size_bytes() {
        let clip = AudioClip::new(vec![0u8; 500], ClipFormat::Flac);
        assert_eq!(clip.human_readable_size(), "500 B");
    }

    #[test]
    fn human_readable_size_kb() {
        let clip = AudioClip::new(vec![0u8; 2048], ClipFormat::Flac);
        assert_eq!(clip.human_readable_size(), "2.0 KB");
    }

    #[test]
    fn human_readable_size_mb() {
        let clip = AudioClip::new(vec![0u8; 2 * 1024 * 1024], ClipFormat::Flac);
        assert_eq!(clip.human_readable_size(), "2.0 MB");
    }

    #[test]
    fn default_format_is_flac() {
        assert_eq!(ClipFormat::default(), ClipFormat::Flac);
    }
}
