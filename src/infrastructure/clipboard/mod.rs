//! Clipboard infrastructure

mod arboard;

pub use arboard::ArboardClipboard;
