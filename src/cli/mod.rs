//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, input and signal handling,
//! and the interview runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod interview_app;
pub mod navigator;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, InterviewOptions};
pub use interview_app::run_interview;
pub use navigator::TerminalNavigator;
pub use presenter::Presenter;
