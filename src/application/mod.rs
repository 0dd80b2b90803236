//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod consent;
pub mod ports;
pub mod seal;
pub mod wizard;

// Re-export use cases
pub use consent::{ConsentError, ConsentRecorder, InvalidRecorderTransition, RecorderState};
pub use seal::{seal_directive, SealError, SealedRecord, SEAL_MARKER};
pub use wizard::DirectiveWizard;
