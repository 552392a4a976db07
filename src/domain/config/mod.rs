//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, CaptureConfig, DEFAULT_BITRATE, MAX_COUNTDOWN_SECS};
