//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// Video Interview - timed, per-question video answers with review
#[derive(Parser, Debug)]
#[command(name = "video-interview")]
#[command(version)]
#[command(about = "Record timed video answers to interview questions, review and submit them")]
#[command(long_about = None)]
pub struct Cli {
    /// Questions file (one prompt per line, '#' starts a comment)
    #[arg(short = 'q', long, value_name = "FILE")]
    pub questions: Option<PathBuf>,

    /// Countdown before recording starts (e.g., 3s, 5s)
    #[arg(short = 'c', long, value_name = "TIME")]
    pub countdown: Option<String>,

    /// Maximum length of one answer (e.g., 90s, 2m)
    #[arg(short = 'm', long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Command used to open a recording for review
    #[arg(long, value_name = "CMD")]
    pub player: Option<String>,

    /// Camera device (e.g., /dev/video0)
    #[arg(long, value_name = "DEVICE")]
    pub video_device: Option<String>,

    /// Microphone device (e.g., default)
    #[arg(long, value_name = "DEVICE")]
    pub audio_device: Option<String>,

    /// Print one JSON state snapshot per change instead of the interactive views
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the questions the interview would ask
    Questions,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed interview options
#[derive(Debug, Clone)]
pub struct InterviewOptions {
    pub countdown: Duration,
    pub max_duration: Duration,
    pub notify: bool,
    pub player: String,
    pub video_device: String,
    pub audio_device: String,
    pub bitrate: u32,
    pub json: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "countdown",
    "max_duration",
    "notify",
    "player",
    "questions",
    "capture.video_device",
    "capture.audio_device",
    "capture.bitrate",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
