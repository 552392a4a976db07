//! Capture port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::config::DEFAULT_BITRATE;
use crate::domain::recording::{RecordingArtifact, VideoMimeType};

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Camera or microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("No active capture stream")]
    CaptureUnavailable,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Failed to finalize capture: {0}")]
    FinalizeFailed(String),

    #[error("FFmpeg not found. Please install FFmpeg.")]
    FfmpegNotFound,
}

impl CaptureError {
    /// Whether the operator can fix this by granting access and retrying
    pub fn is_access_problem(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::DeviceUnavailable(_) | Self::FfmpegNotFound
        )
    }
}

/// A granted camera + microphone stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStream {
    pub video_device: String,
    pub audio_device: String,
}

impl LiveStream {
    pub fn new(video_device: impl Into<String>, audio_device: impl Into<String>) -> Self {
        Self {
            video_device: video_device.into(),
            audio_device: audio_device.into(),
        }
    }
}

/// Encoding parameters requested for every capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub mime_type: VideoMimeType,
    /// Bits per second
    pub bitrate: u32,
    pub width: u32,
    pub height: u32,
    /// Front-facing camera
    pub facing_user: bool,
    pub with_audio: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            mime_type: VideoMimeType::Webm,
            bitrate: DEFAULT_BITRATE,
            width: 1280,
            height: 720,
            facing_user: true,
            with_audio: true,
        }
    }
}

/// Receiver for the live preview of a granted stream
pub trait LiveFeedSink: Send + Sync {
    fn show_live_feed(&self, stream: &LiveStream, settings: &CaptureSettings);
}

/// Port for camera/microphone capture
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Ask for camera and microphone access (one-shot).
    ///
    /// # Returns
    /// The granted stream, or `PermissionDenied`/`DeviceUnavailable`
    async fn request_access(&self) -> Result<LiveStream, CaptureError>;

    /// Route the live stream to a preview sink
    fn attach_live_feed(
        &self,
        stream: &LiveStream,
        settings: &CaptureSettings,
        sink: &dyn LiveFeedSink,
    ) {
        sink.show_live_feed(stream, settings);
    }

    /// Start encoding the live stream
    async fn begin_capture(
        &self,
        stream: &LiveStream,
        settings: &CaptureSettings,
    ) -> Result<(), CaptureError>;

    /// Stop encoding and return the finished artifact (single completion).
    ///
    /// On `FinalizeFailed` the capture stays active and may be finalized
    /// again. `CaptureUnavailable` means there is no capture left to finalize.
    async fn finalize_capture(&self) -> Result<RecordingArtifact, CaptureError>;

    /// Stop encoding and throw the output away
    async fn discard_capture(&self) -> Result<(), CaptureError>;
}
