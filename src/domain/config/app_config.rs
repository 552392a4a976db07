//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::interview::QuestionSet;
use crate::domain::recording::Duration;

/// Longest countdown accepted from configuration
pub const MAX_COUNTDOWN_SECS: u64 = 10;

/// Fixed capture bitrate in bits per second
pub const DEFAULT_BITRATE: u32 = 128_000;

#[cfg(target_os = "macos")]
const DEFAULT_VIDEO_DEVICE: &str = "0";
#[cfg(not(target_os = "macos"))]
const DEFAULT_VIDEO_DEVICE: &str = "/dev/video0";

#[cfg(target_os = "macos")]
const DEFAULT_AUDIO_DEVICE: &str = "0";
#[cfg(not(target_os = "macos"))]
const DEFAULT_AUDIO_DEVICE: &str = "default";

#[cfg(target_os = "macos")]
const DEFAULT_PLAYER: &str = "open";
#[cfg(not(target_os = "macos"))]
const DEFAULT_PLAYER: &str = "xdg-open";

/// Capture device configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub video_device: Option<String>,
    pub audio_device: Option<String>,
    pub bitrate: Option<u32>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub countdown: Option<String>,
    pub max_duration: Option<String>,
    pub notify: Option<bool>,
    pub player: Option<String>,
    pub questions: Option<Vec<String>>,
    pub capture: Option<CaptureConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            countdown: Some("3s".to_string()),
            max_duration: Some("2m".to_string()),
            notify: Some(false),
            player: Some(DEFAULT_PLAYER.to_string()),
            questions: Some(QuestionSet::builtin().iter().map(String::from).collect()),
            capture: Some(CaptureConfig {
                video_device: Some(DEFAULT_VIDEO_DEVICE.to_string()),
                audio_device: Some(DEFAULT_AUDIO_DEVICE.to_string()),
                bitrate: Some(DEFAULT_BITRATE),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            countdown: other.countdown.or(self.countdown),
            max_duration: other.max_duration.or(self.max_duration),
            notify: other.notify.or(self.notify),
            player: other.player.or(self.player),
            questions: other.questions.or(self.questions),
            capture: Self::merge_capture_config(self.capture, other.capture),
        }
    }

    /// Merge capture config sections
    fn merge_capture_config(
        base: Option<CaptureConfig>,
        other: Option<CaptureConfig>,
    ) -> Option<CaptureConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(CaptureConfig {
                video_device: o.video_device.or(b.video_device),
                audio_device: o.audio_device.or(b.audio_device),
                bitrate: o.bitrate.or(b.bitrate),
            }),
        }
    }

    /// Get countdown as parsed Duration, or default if not set/invalid/too long
    pub fn countdown_or_default(&self) -> Duration {
        self.countdown
            .as_ref()
            .and_then(|s| s.parse::<Duration>().ok())
            .filter(|d| d.as_secs() <= MAX_COUNTDOWN_SECS)
            .unwrap_or_else(Duration::default_countdown)
    }

    /// Get max_duration as parsed Duration, or default if not set/invalid
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_max_duration)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get player command, or the platform opener if not set
    pub fn player_or_default(&self) -> &str {
        self.player.as_deref().unwrap_or(DEFAULT_PLAYER)
    }

    /// Get configured questions, or the built-in set if none are usable
    pub fn questions_or_default(&self) -> QuestionSet {
        self.questions
            .as_ref()
            .and_then(|q| QuestionSet::new(q.iter().map(String::as_str)).ok())
            .unwrap_or_else(QuestionSet::builtin)
    }

    /// Get video device, or the platform default if not set
    pub fn video_device_or_default(&self) -> &str {
        self.capture
            .as_ref()
            .and_then(|c| c.video_device.as_deref())
            .unwrap_or(DEFAULT_VIDEO_DEVICE)
    }

    /// Get audio device, or the platform default if not set
    pub fn audio_device_or_default(&self) -> &str {
        self.capture
            .as_ref()
            .and_then(|c| c.audio_device.as_deref())
            .unwrap_or(DEFAULT_AUDIO_DEVICE)
    }

    /// Get capture bitrate, or 128 kbit/s if not set
    pub fn bitrate_or_default(&self) -> u32 {
        self.capture
            .as_ref()
            .and_then(|c| c.bitrate)
            .unwrap_or(DEFAULT_BITRATE)
    }
}
