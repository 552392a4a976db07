//! File-backed playback adapter
//!
//! Writes each artifact under review to a cache file and hands that file
//! to an external player. File names are reserved atomically, so runs
//! sharing the cache directory never collide.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::ports::{PlayableHandle, PlaybackError, PlaybackProvider};
use crate::domain::recording::RecordingArtifact;

/// Playback through review files and an external player command
pub struct FilePlayback {
    dir: PathBuf,
    player: String,
}

impl FilePlayback {
    /// Create with the default cache directory
    pub fn new(player: impl Into<String>) -> Self {
        let dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("video-interview");
        Self::with_dir(dir, player)
    }

    /// Create with a custom review directory
    pub fn with_dir(dir: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            player: player.into(),
        }
    }

    /// Reserve a review file no other run can be using
    fn reserve_review_path(&self, artifact: &RecordingArtifact) -> Result<PathBuf, PlaybackError> {
        let (_, path) = tempfile::Builder::new()
            .prefix(&format!("review-{}-", artifact.id()))
            .suffix(&format!(".{}", artifact.mime_type().extension()))
            .tempfile_in(&self.dir)
            .and_then(|file| file.keep().map_err(|e| e.error))
            .map_err(|e| PlaybackError::CreateFailed(e.to_string()))?;
        Ok(path)
    }
}

#[async_trait]
impl PlaybackProvider for FilePlayback {
    async fn create_handle(
        &self,
        artifact: &RecordingArtifact,
    ) -> Result<PlayableHandle, PlaybackError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PlaybackError::CreateFailed(e.to_string()))?;

        let path = self.reserve_review_path(artifact)?;
        if let Err(e) = fs::write(&path, artifact.data()).await {
            let _ = fs::remove_file(&path).await;
            return Err(PlaybackError::CreateFailed(e.to_string()));
        }

        Ok(PlayableHandle::new(artifact.id(), path))
    }

    async fn play(&self, handle: &PlayableHandle) -> Result<(), PlaybackError> {
        let mut child = Command::new(&self.player)
            .arg(handle.location())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    PlaybackError::PlayerNotFound(self.player.clone())
                } else {
                    PlaybackError::PlayFailed(e.to_string())
                }
            })?;

        debug!(player = %self.player, location = %handle.location().display(), "player launched");

        // Reap the player in the background; it may outlive the review.
        tokio::spawn(async move {
            let _ = child.wait().await;
        });
        Ok(())
    }

    fn release(&self, handle: PlayableHandle) {
        match std::fs::remove_file(handle.location()) {
            Ok(()) => debug!(artifact = %handle.artifact_id(), "review file removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, location = %handle.location().display(), "failed to remove review file"),
        }
    }
}
