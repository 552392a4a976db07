//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted interview settings (the file layer of the config merge)
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings. A missing file yields `AppConfig::empty()`.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write `AppConfig::defaults()`.
    /// Fails with `AlreadyExists` rather than overwriting.
    async fn init(&self) -> Result<(), ConfigError>;
}
