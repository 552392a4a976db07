//! Desktop notification adapter using notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

const DEFAULT_APP_NAME: &str = "Video Interview";

/// How long informational notifications stay on screen
const SHORT_TIMEOUT_MS: u32 = 5_000;

/// Desktop notifier using notify-rust
pub struct NotifyRustNotifier {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustNotifier {
    /// Create a notifier labelled "Video Interview"
    pub fn new() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Warnings need acting on, so they stay until dismissed
    fn timeout_for(icon: NotificationIcon) -> Timeout {
        match icon {
            NotificationIcon::Warning => Timeout::Never,
            NotificationIcon::Info | NotificationIcon::Success => {
                Timeout::Milliseconds(SHORT_TIMEOUT_MS)
            }
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let title = title.to_owned();
        let message = message.to_owned();
        let app_name = self.app_name.clone();
        let icon_name = icon.icon_name().to_string();
        let timeout = Self::timeout_for(icon);

        // notify-rust blocks on the D-Bus round trip
        tokio::task::spawn_blocking(move || {
            Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon(&icon_name)
                .timeout(timeout)
                .show()
                .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}
