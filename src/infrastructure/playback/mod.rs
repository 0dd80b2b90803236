//! Clip playback infrastructure

mod rodio_player;

pub use rodio_player::RodioClipPlayer;
