//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod clipboard;
pub mod config;
pub mod digest;
pub mod playback;
pub mod summarizer;

// Re-export common types
pub use capture::{CaptureError, ConsentCapture};
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use digest::{DigestError, DigestFunction};
pub use playback::{ClipPlayer, PlaybackError};
pub use summarizer::{Summarizer, SummaryError};
