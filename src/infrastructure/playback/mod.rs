//! Playback infrastructure module

mod file;

pub use file::FilePlayback;
