//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 3s, 1m, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a question set would contain no questions
#[derive(Debug, Clone, Error)]
#[error("Question set is empty: at least one interview question is required")]
pub struct EmptyQuestionSetError;

/// Error when an operator command cannot be parsed
#[derive(Debug, Clone, Error)]
#[error("Unknown command: \"{input}\". Valid commands: start, stop, play, accept, redo, retry, quit")]
pub struct InvalidCommandError {
    pub input: String,
}

/// Error when an operation is invoked outside the phase it is valid in.
///
/// Both state machines report misuse through this type. Reaching it from
/// operator input means a guard is missing, so callers treat it as fatal.
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: String,
    pub action: String,
}

impl InvalidStateTransition {
    pub(crate) fn new(current_state: impl ToString, action: &str) -> Self {
        Self {
            current_state: current_state.to_string(),
            action: action.to_string(),
        }
    }
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
