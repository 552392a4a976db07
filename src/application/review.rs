//! Review presenter use case

use tracing::{debug, info};

use crate::domain::recording::RecordingArtifact;

use super::ports::{PlayableHandle, PlaybackError, PlaybackProvider};

/// Holds at most one playable handle for the artifact under review.
/// The handle is released on replacement, on explicit release and on drop.
pub struct ReviewPresenter<P>
where
    P: PlaybackProvider,
{
    playback: P,
    handle: Option<PlayableHandle>,
}

impl<P> ReviewPresenter<P>
where
    P: PlaybackProvider,
{
    pub fn new(playback: P) -> Self {
        Self {
            playback,
            handle: None,
        }
    }

    /// Create a handle for the artifact, releasing any previous one first
    pub async fn present(
        &mut self,
        artifact: &RecordingArtifact,
    ) -> Result<&PlayableHandle, PlaybackError> {
        self.release();
        let handle = self.playback.create_handle(artifact).await?;
        info!(artifact = %artifact.id(), location = %handle.location().display(), "ready for review");
        Ok(self.handle.insert(handle))
    }

    /// Play the current handle. Returns false if there is nothing to play.
    pub async fn play(&self) -> Result<bool, PlaybackError> {
        match &self.handle {
            Some(handle) => {
                self.playback.play(handle).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn handle(&self) -> Option<&PlayableHandle> {
        self.handle.as_ref()
    }

    /// Release the current handle, if any
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(artifact = %handle.artifact_id(), "releasing review handle");
            self.playback.release(handle);
        }
    }
}

impl<P> Drop for ReviewPresenter<P>
where
    P: PlaybackProvider,
{
    fn drop(&mut self) {
        self.release();
    }
}
