//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, CaptureConfig, MAX_COUNTDOWN_SECS};
use crate::domain::error::ConfigError;
use crate::domain::interview::QuestionSet;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Separator for `questions` on the command line
const QUESTION_SEPARATOR: char = '|';

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            read_value(&config, key).as_deref().unwrap_or(NOT_SET),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Write a validated value into the config
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "countdown" => config.countdown = Some(value.to_string()),
        "max_duration" => config.max_duration = Some(value.to_string()),
        "notify" => config.notify = Some(parse_bool(key, value)?),
        "player" => config.player = Some(value.trim().to_string()),
        "questions" => config.questions = Some(split_questions(value)),
        "capture.video_device" => capture_mut(config).video_device = Some(value.to_string()),
        "capture.audio_device" => capture_mut(config).audio_device = Some(value.to_string()),
        "capture.bitrate" => capture_mut(config).bitrate = Some(parse_bitrate(key, value)?),
        _ => return ensure_valid_key(key),
    }
    Ok(())
}

/// Read a stored value for display
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    let capture = config.capture.as_ref();
    match key {
        "countdown" => config.countdown.clone(),
        "max_duration" => config.max_duration.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "player" => config.player.clone(),
        "questions" => config
            .questions
            .as_ref()
            .map(|q| q.join(&format!(" {} ", QUESTION_SEPARATOR))),
        "capture.video_device" => capture.and_then(|c| c.video_device.clone()),
        "capture.audio_device" => capture.and_then(|c| c.audio_device.clone()),
        "capture.bitrate" => capture.and_then(|c| c.bitrate).map(|b| b.to_string()),
        _ => None,
    }
}

fn capture_mut(config: &mut AppConfig) -> &mut CaptureConfig {
    config.capture.get_or_insert_with(CaptureConfig::default)
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "countdown" => {
            let duration = parse_duration(key, value)?;
            if duration.as_secs() > MAX_COUNTDOWN_SECS {
                return Err(invalid(
                    key,
                    format!("Countdown must be at most {}s", MAX_COUNTDOWN_SECS),
                ));
            }
        }
        "max_duration" => {
            let duration = parse_duration(key, value)?;
            if duration.as_secs() < 1 {
                return Err(invalid(key, "Maximum duration must be at least 1s"));
            }
        }
        "notify" => {
            parse_bool(key, value)?;
        }
        "player" | "capture.video_device" | "capture.audio_device" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
        }
        "questions" => {
            QuestionSet::new(split_questions(value)).map_err(|e| invalid(key, e.to_string()))?;
        }
        "capture.bitrate" => {
            parse_bitrate(key, value)?;
        }
        _ => {}
    }
    Ok(())
}

fn split_questions(value: &str) -> Vec<String> {
    value
        .split(QUESTION_SEPARATOR)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect()
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<Duration>()
        .map_err(|e| invalid(key, e.to_string()))
}

fn parse_bitrate(key: &str, value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(bitrate) if bitrate > 0 => Ok(bitrate),
        _ => Err(invalid(key, "Value must be a positive number of bits per second")),
    }
}

/// Parse a boolean value
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, "Value must be 'true' or 'false'")),
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}
