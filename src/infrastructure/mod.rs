//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, media players
//! and the desktop notification service.

pub mod capture;
pub mod config;
pub mod notification;
pub mod playback;

// Re-export adapters
pub use capture::FfmpegCapture;
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use playback::FilePlayback;
