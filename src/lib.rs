//! DignityDirective - end-of-life care directive wizard
//!
//! This crate provides the core functionality for collecting an
//! end-of-life care directive across nine sequential steps, recording
//! spoken consents from the microphone, drafting a formal summary
//! document through Google Gemini, and sealing the directive with a
//! SHA-256 content hash.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Form aggregate, wizard state machine, step rules, value objects
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, Gemini, sha2, etc.)
//! - **CLI**: Command-line interface, interactive step screens, and presentation

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
