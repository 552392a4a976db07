//! Interview flow state machine

use std::fmt;

use serde::Serialize;

use crate::domain::error::InvalidStateTransition;
use crate::domain::recording::RecordingArtifact;

use super::question::QuestionSet;

/// Interview flow phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    #[default]
    Capturing,
    Reviewing,
    Finished,
}

impl FlowPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Capturing => "capturing",
            Self::Reviewing => "reviewing",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of accepting the artifact under review
#[derive(Debug)]
pub enum AcceptOutcome {
    /// Moved on to the question at `position`
    Advanced {
        position: usize,
        submitted: RecordingArtifact,
    },
    /// The last question was accepted
    Finished { submitted: RecordingArtifact },
}

impl AcceptOutcome {
    /// The accepted artifact, handed over for submission and release
    pub fn into_submitted(self) -> RecordingArtifact {
        match self {
            Self::Advanced { submitted, .. } | Self::Finished { submitted } => submitted,
        }
    }
}

/// Interview flow entity.
/// Sequences questions and mediates between capture and review.
///
/// State machine:
///   CAPTURING -> REVIEWING (on_artifact_ready)
///   REVIEWING -> CAPTURING (on_re_record)
///   REVIEWING -> CAPTURING, position + 1 (on_accept, not last)
///   REVIEWING -> FINISHED (on_accept, last)
#[derive(Debug)]
pub struct InterviewFlow {
    questions: QuestionSet,
    position: usize,
    phase: FlowPhase,
    artifact: Option<RecordingArtifact>,
}

impl InterviewFlow {
    /// Start at the first question, capturing
    pub fn start(questions: QuestionSet) -> Self {
        Self {
            questions,
            position: 0,
            phase: FlowPhase::Capturing,
            artifact: None,
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// Current 0-based position. Stays at the last index once finished.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Prompt for the current position, `None` once finished
    pub fn current_question(&self) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.position)
    }

    /// Artifact under review, if any
    pub fn artifact(&self) -> Option<&RecordingArtifact> {
        self.artifact.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == FlowPhase::Finished
    }

    pub fn is_last_question(&self) -> bool {
        self.position == self.questions.last_index()
    }

    /// Transition from CAPTURING to REVIEWING, taking ownership of the artifact
    pub fn on_artifact_ready(
        &mut self,
        artifact: RecordingArtifact,
    ) -> Result<(), InvalidStateTransition> {
        if self.phase != FlowPhase::Capturing {
            return Err(InvalidStateTransition::new(self.phase, "accept a new recording"));
        }
        self.artifact = Some(artifact);
        self.phase = FlowPhase::Reviewing;
        Ok(())
    }

    /// Transition from REVIEWING to CAPTURING.
    /// Returns the discarded artifact so the caller can release it.
    pub fn on_re_record(&mut self) -> Result<RecordingArtifact, InvalidStateTransition> {
        let artifact = self.take_reviewed("re-record")?;
        self.phase = FlowPhase::Capturing;
        Ok(artifact)
    }

    /// Accept the artifact under review and advance
    pub fn on_accept(&mut self) -> Result<AcceptOutcome, InvalidStateTransition> {
        let submitted = self.take_reviewed("accept")?;
        if self.is_last_question() {
            self.phase = FlowPhase::Finished;
            Ok(AcceptOutcome::Finished { submitted })
        } else {
            self.position += 1;
            self.phase = FlowPhase::Capturing;
            Ok(AcceptOutcome::Advanced {
                position: self.position,
                submitted,
            })
        }
    }

    fn take_reviewed(&mut self, action: &str) -> Result<RecordingArtifact, InvalidStateTransition> {
        if self.phase != FlowPhase::Reviewing {
            return Err(InvalidStateTransition::new(self.phase, action));
        }
        self.artifact
            .take()
            .ok_or_else(|| InvalidStateTransition::new(self.phase, action))
    }
}
