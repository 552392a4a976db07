//! Capture infrastructure module
//!
//! Records camera and microphone through an FFmpeg child process.

mod ffmpeg;

pub use ffmpeg::FfmpegCapture;
