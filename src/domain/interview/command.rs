//! Operator command value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidCommandError;

/// Actions the candidate can take during an interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCommand {
    /// Whatever the current view offers first (start, stop, accept or retry)
    Primary,
    Start,
    Stop,
    Play,
    Accept,
    ReRecord,
    RetryPermission,
    Quit,
}

impl OperatorCommand {
    /// Get the canonical command word
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Play => "play",
            Self::Accept => "accept",
            Self::ReRecord => "redo",
            Self::RetryPermission => "retry",
            Self::Quit => "quit",
        }
    }
}

impl FromStr for OperatorCommand {
    type Err = InvalidCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Self::Primary),
            "start" | "s" => Ok(Self::Start),
            "stop" | "x" => Ok(Self::Stop),
            "play" | "p" => Ok(Self::Play),
            "accept" | "a" | "submit" => Ok(Self::Accept),
            "redo" | "r" | "rerecord" => Ok(Self::ReRecord),
            "retry" | "t" => Ok(Self::RetryPermission),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            _ => Err(InvalidCommandError { input: s.trim().to_string() }),
        }
    }
}

impl fmt::Display for OperatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "<enter>"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}
