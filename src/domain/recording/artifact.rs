//! Recording artifact value object

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(1);

/// Supported video container types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum VideoMimeType {
    #[default]
    Webm,
    Mp4,
}

impl VideoMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for VideoMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-unique identifier of one capture cycle's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactId(u64);

impl ArtifactId {
    fn next() -> Self {
        Self(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finalized video produced by one capture cycle.
///
/// Not `Clone`. Ownership moves from the recorder to the flow and from there
/// to submission or disposal.
#[derive(Debug)]
pub struct RecordingArtifact {
    id: ArtifactId,
    data: Vec<u8>,
    mime_type: VideoMimeType,
    elapsed_secs: u64,
}

impl RecordingArtifact {
    /// Wrap finalized capture bytes, assigning a fresh id
    pub fn new(data: Vec<u8>, mime_type: VideoMimeType) -> Self {
        Self {
            id: ArtifactId::next(),
            data,
            mime_type,
            elapsed_secs: 0,
        }
    }

    /// Record how many seconds the capture ran
    pub fn with_elapsed_secs(mut self, elapsed_secs: u64) -> Self {
        self.elapsed_secs = elapsed_secs;
        self
    }

    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// Get the raw video bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> VideoMimeType {
        self.mime_type
    }

    /// Seconds of recording the artifact covers
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
