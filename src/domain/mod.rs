//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod interview;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use interview::{AcceptOutcome, FlowPhase, InterviewFlow, OperatorCommand, QuestionSet};
pub use recording::{Duration, RecordingArtifact, RecordingPhase, RecordingSession, VideoMimeType};
