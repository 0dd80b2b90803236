//! Recorded consent value objects

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::audio::AudioClip;

/// The parties whose spoken consent is captured for an advance directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentRole {
    Patient,
    Family,
    Physician,
}

/// All consent roles, in capture order
pub const ALL_CONSENT_ROLES: &[ConsentRole] = &[
    ConsentRole::Patient,
    ConsentRole::Family,
    ConsentRole::Physician,
];

impl ConsentRole {
    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Patient => "Patient Consent",
            Self::Family => "Family Member Consent",
            Self::Physician => "Physician Consent",
        }
    }
}

impl fmt::Display for ConsentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One recorded spoken consent.
///
/// Holds the finalized clip once a recording session completes. The
/// "recorded" flag of the original data model is derived from clip
/// presence, so the two can never disagree.
#[derive(Debug, Clone, Default)]
pub struct ConsentRecording {
    clip: Option<AudioClip>,
}

impl ConsentRecording {
    /// Create an empty recording slot
    pub fn empty() -> Self {
        Self { clip: None }
    }

    /// Create a populated recording from a finalized clip
    pub fn recorded(clip: AudioClip) -> Self {
        Self { clip: Some(clip) }
    }

    /// Whether a consent clip has been recorded
    pub fn is_recorded(&self) -> bool {
        self.clip.is_some()
    }

    /// Get the recorded clip, if any
    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    /// Release the recorded clip, returning the slot to empty
    pub fn clear(&mut self) {
        self.clip = None;
    }
}

// The sealed serialization records that a consent exists and how large the
// clip is, never the raw audio bytes.
impl Serialize for ConsentRecording {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConsentRecording", 2)?;
        state.serialize_field("is_recorded", &self.is_recorded())?;
        state.serialize_field(
            "clip_bytes",
            &self.clip.as_ref().map_or(0, |c| c.size_bytes()),
        )?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::ClipFormat;

    #[test]
    fn empty_slot_is_not_recorded() {
        let recording = ConsentRecording::empty();
        assert!(!recording.is_recorded());
        assert!(recording.clip().is_none());
    }

    #[test]
    fn recorded_slot_holds_the_clip() {
        let recording = ConsentRecording::recorded(AudioClip::new(vec![1, 2, 3], ClipFormat::Flac));
        assert!(recording.is_recorded());
        assert_eq!(recording.clip().unwrap().size_bytes(), 3);
    }

    #[test]
    fn clear_releases_the_clip() {
        let mut recording =
            ConsentRecording::recorded(AudioClip::new(vec![1, 2, 3], ClipFormat::Flac));
        recording.clear();
        assert!(!recording.is_recorded());
        assert!(recording.clip().is_none());
    }

    #[test]
    fn serializes_flag_and_size_without_audio() {
        let recording = ConsentRecording::recorded(AudioClip::new(vec![0u8; 64], ClipFormat::Flac));
        let json = serde_json::to_string(&recording).unwrap();
        assert_eq!(json, r#"{"is_recorded":true,"clip_bytes":64}"#);
    }

    #[test]
    fn role_labels() {
        assert_eq!(ConsentRole::Patient.label(), "Patient Consent");
        assert_eq!(ConsentRole::Physician.label(), "Physician Consent");
        assert_eq!(ALL_CONSENT_ROLES.len(), 3);
    }
}
