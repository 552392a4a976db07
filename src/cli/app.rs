//! Configuration loading and option resolution for the interview runner

use std::env;
use std::path::Path;

use tracing::warn;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, CaptureConfig, MAX_COUNTDOWN_SECS};
use crate::domain::interview::QuestionSet;
use crate::domain::recording::Duration;
use crate::infrastructure::XdgConfigStore;

use super::args::{Cli, InterviewOptions};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides
pub const ENV_VIDEO_DEVICE: &str = "VIDEO_INTERVIEW_VIDEO_DEVICE";
pub const ENV_PLAYER: &str = "VIDEO_INTERVIEW_PLAYER";

/// Build the CLI layer of the config from parsed arguments
pub fn cli_config(cli: &Cli) -> AppConfig {
    let capture = if cli.video_device.is_some() || cli.audio_device.is_some() {
        Some(CaptureConfig {
            video_device: cli.video_device.clone(),
            audio_device: cli.audio_device.clone(),
            bitrate: None,
        })
    } else {
        None
    };

    AppConfig {
        countdown: cli.countdown.clone(),
        max_duration: cli.max_duration.clone(),
        notify: if cli.notify { Some(true) } else { None },
        player: cli.player.clone(),
        questions: None,
        capture,
    }
}

/// Build the environment layer of the config
pub fn env_config() -> AppConfig {
    let video_device = non_empty_var(ENV_VIDEO_DEVICE);
    AppConfig {
        player: non_empty_var(ENV_PLAYER),
        capture: video_device.map(|device| CaptureConfig {
            video_device: Some(device),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, path = %store.path().display(), "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Turn a merged config into validated interview options.
/// Errors are usage errors.
pub fn resolve_options(config: &AppConfig, json: bool) -> Result<InterviewOptions, String> {
    let countdown = match config.countdown.as_deref() {
        Some(s) => s
            .parse::<Duration>()
            .map_err(|e| format!("Invalid countdown: {}", e))?,
        None => Duration::default_countdown(),
    };
    if countdown.as_secs() > MAX_COUNTDOWN_SECS {
        return Err(format!(
            "Invalid countdown: must be at most {}s",
            MAX_COUNTDOWN_SECS
        ));
    }

    let max_duration = match config.max_duration.as_deref() {
        Some(s) => s
            .parse::<Duration>()
            .map_err(|e| format!("Invalid max-duration: {}", e))?,
        None => Duration::default_max_duration(),
    };
    if max_duration.as_secs() < 1 {
        return Err("Invalid max-duration: must be at least 1s".to_string());
    }

    Ok(InterviewOptions {
        countdown,
        max_duration,
        notify: config.notify_or_default(),
        player: config.player_or_default().to_string(),
        video_device: config.video_device_or_default().to_string(),
        audio_device: config.audio_device_or_default().to_string(),
        bitrate: config.bitrate_or_default(),
        json,
    })
}

/// Questions from a file if given, otherwise from the merged config
pub async fn load_questions(
    path: Option<&Path>,
    config: &AppConfig,
) -> Result<QuestionSet, String> {
    match path {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read questions file {}: {}", path.display(), e))?;
            QuestionSet::parse_lines(&content)
                .map_err(|e| format!("{}: {}", path.display(), e))
        }
        None => Ok(config.questions_or_default()),
    }
}
