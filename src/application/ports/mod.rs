//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod navigator;
pub mod notifier;
pub mod playback;

// Re-export common types
pub use capture::{CaptureError, CaptureProvider, CaptureSettings, LiveFeedSink, LiveStream};
pub use config::ConfigStore;
pub use navigator::Navigator;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use playback::{PlayableHandle, PlaybackError, PlaybackProvider};
