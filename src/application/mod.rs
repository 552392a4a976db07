//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod interview;
pub mod ports;
pub mod recorder;
pub mod review;

// Re-export use cases
pub use interview::{
    CommandOutcome, InterviewConfig, InterviewError, InterviewSnapshot, InterviewUseCase,
    InterviewView, SUBMITTED_MESSAGE,
};
pub use recorder::{RecorderConfig, RecordingController, TICK_PERIOD};
pub use review::ReviewPresenter;
