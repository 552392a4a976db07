//! Recording domain module

mod artifact;
mod duration;
mod session;

pub use artifact::{ArtifactId, RecordingArtifact, VideoMimeType};
pub use duration::{format_clock, Duration, DEFAULT_COUNTDOWN_SECS, DEFAULT_MAX_DURATION_SECS};
pub use session::{RecordingPhase, RecordingSession, TickOutcome};
