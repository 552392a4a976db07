//! Recording session state machine

use std::fmt;

use serde::Serialize;

use crate::domain::error::InvalidStateTransition;

use super::duration::Duration;

/// Capture lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "phase", content = "seconds", rename_all = "snake_case")]
pub enum RecordingPhase {
    #[default]
    Idle,
    /// Capture device refused; only a permission retry is accepted
    PermissionDenied,
    /// Seconds left before capture begins
    CountingDown(u64),
    /// Seconds captured so far
    Recording(u64),
    Stopped,
}

impl RecordingPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PermissionDenied => "permission-denied",
            Self::CountingDown(_) => "counting-down",
            Self::Recording(_) => "recording",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RecordingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a single timer tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer should be running in the current phase
    Ignored,
    /// Countdown advanced; seconds remaining
    Countdown(u64),
    /// Countdown hit zero; the session is now `Recording(0)` and capture must begin
    BeginCapture,
    /// Recording advanced; seconds elapsed
    Elapsed(u64),
    /// Elapsed time is at the ceiling; the recording must be stopped now
    CeilingReached(u64),
}

/// Recording session entity.
/// Clock-free: the owner feeds it one `tick` per elapsed second.
///
/// State machine:
///   IDLE -> COUNTING_DOWN(n) (request_start)
///   COUNTING_DOWN(1) -> RECORDING(0) (tick)
///   RECORDING(e) -> RECORDING(e + 1) (tick, capped at the ceiling)
///   RECORDING -> STOPPED (stop)
///   STOPPED -> RECORDING (resume_recording, finalization failed)
///   STOPPED -> IDLE (reset)
///   IDLE <-> PERMISSION_DENIED (deny_access / grant_access)
#[derive(Debug)]
pub struct RecordingSession {
    phase: RecordingPhase,
    countdown_secs: u64,
    max_secs: u64,
}

impl RecordingSession {
    /// Create a session in idle state.
    /// Both values are clamped to at least one second.
    pub fn new(countdown: Duration, max_duration: Duration) -> Self {
        Self {
            phase: RecordingPhase::Idle,
            countdown_secs: countdown.as_secs().max(1),
            max_secs: max_duration.as_secs().max(1),
        }
    }

    pub fn phase(&self) -> RecordingPhase {
        self.phase
    }

    /// Recording ceiling in seconds
    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RecordingPhase::Idle
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.phase, RecordingPhase::Recording(_))
    }

    /// True only in the phases that need the one-second ticker
    pub fn has_active_timer(&self) -> bool {
        matches!(
            self.phase,
            RecordingPhase::CountingDown(_) | RecordingPhase::Recording(_)
        )
    }

    /// Begin the countdown. Returns false, leaving the phase untouched,
    /// unless the session is idle.
    pub fn request_start(&mut self) -> bool {
        if self.phase != RecordingPhase::Idle {
            return false;
        }
        self.phase = RecordingPhase::CountingDown(self.countdown_secs);
        true
    }

    /// Advance by one second
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            RecordingPhase::CountingDown(remaining) if remaining <= 1 => {
                self.phase = RecordingPhase::Recording(0);
                TickOutcome::BeginCapture
            }
            RecordingPhase::CountingDown(remaining) => {
                self.phase = RecordingPhase::CountingDown(remaining - 1);
                TickOutcome::Countdown(remaining - 1)
            }
            RecordingPhase::Recording(elapsed) if elapsed >= self.max_secs => {
                TickOutcome::CeilingReached(elapsed)
            }
            RecordingPhase::Recording(elapsed) => {
                let elapsed = elapsed + 1;
                self.phase = RecordingPhase::Recording(elapsed);
                if elapsed >= self.max_secs {
                    TickOutcome::CeilingReached(elapsed)
                } else {
                    TickOutcome::Elapsed(elapsed)
                }
            }
            _ => TickOutcome::Ignored,
        }
    }

    /// Transition from RECORDING to STOPPED, returning the elapsed seconds
    pub fn stop(&mut self) -> Result<u64, InvalidStateTransition> {
        match self.phase {
            RecordingPhase::Recording(elapsed) => {
                self.phase = RecordingPhase::Stopped;
                Ok(elapsed)
            }
            current => Err(InvalidStateTransition::new(current, "stop recording")),
        }
    }

    /// Transition from STOPPED back to RECORDING when no artifact could be produced
    pub fn resume_recording(&mut self, elapsed: u64) -> Result<(), InvalidStateTransition> {
        if self.phase != RecordingPhase::Stopped {
            return Err(InvalidStateTransition::new(self.phase, "resume recording"));
        }
        self.phase = RecordingPhase::Recording(elapsed.min(self.max_secs));
        Ok(())
    }

    /// Transition from STOPPED to IDLE for the next capture cycle
    pub fn reset(&mut self) -> Result<(), InvalidStateTransition> {
        if self.phase != RecordingPhase::Stopped {
            return Err(InvalidStateTransition::new(self.phase, "reset session"));
        }
        self.phase = RecordingPhase::Idle;
        Ok(())
    }

    /// Transition from IDLE to PERMISSION_DENIED
    pub fn deny_access(&mut self) -> Result<(), InvalidStateTransition> {
        if self.phase != RecordingPhase::Idle {
            return Err(InvalidStateTransition::new(self.phase, "deny access"));
        }
        self.phase = RecordingPhase::PermissionDenied;
        Ok(())
    }

    /// Transition from PERMISSION_DENIED to IDLE
    pub fn grant_access(&mut self) -> Result<(), InvalidStateTransition> {
        if self.phase != RecordingPhase::PermissionDenied {
            return Err(InvalidStateTransition::new(self.phase, "grant access"));
        }
        self.phase = RecordingPhase::Idle;
        Ok(())
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new(Duration::default_countdown(), Duration::default_max_duration())
    }
}
