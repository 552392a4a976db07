//! Playback port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{ArtifactId, RecordingArtifact};

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Failed to prepare recording for playback: {0}")]
    CreateFailed(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Failed to play recording: {0}")]
    PlayFailed(String),
}

/// Playable representation of one artifact.
/// Must be handed back to `PlaybackProvider::release`.
#[derive(Debug, PartialEq, Eq)]
pub struct PlayableHandle {
    artifact_id: ArtifactId,
    location: PathBuf,
}

impl PlayableHandle {
    pub fn new(artifact_id: ArtifactId, location: impl Into<PathBuf>) -> Self {
        Self {
            artifact_id,
            location: location.into(),
        }
    }

    pub fn artifact_id(&self) -> ArtifactId {
        self.artifact_id
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Port for reviewing recorded artifacts
#[async_trait]
pub trait PlaybackProvider: Send + Sync {
    /// Create a playable handle for an artifact
    async fn create_handle(
        &self,
        artifact: &RecordingArtifact,
    ) -> Result<PlayableHandle, PlaybackError>;

    /// Open the handle in a player
    async fn play(&self, handle: &PlayableHandle) -> Result<(), PlaybackError>;

    /// Release the handle's underlying resource.
    /// Synchronous so it can run from `Drop`.
    fn release(&self, handle: PlayableHandle);
}
