//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the microphone, audio output, the Gemini API,
//! the system clipboard, and the config file.

pub mod capture;
pub mod clipboard;
pub mod config;
pub mod playback;
pub mod seal;
pub mod summary;

// Re-export adapters
pub use capture::CpalConsentCapture;
pub use clipboard::ArboardClipboard;
pub use config::XdgConfigStore;
pub use playback::RodioClipPlayer;
pub use seal::Sha256Digest;
pub use summary::GeminiSummarizer;
