//! Audio value objects for recorded consent clips

mod clip;

pub use clip::{AudioClip, ClipFormat};
