//! Repository trait for settings.

use async_trait::async_trait;

use crate::errors::Result;

use super::settings_model::Settings;

/// Repository trait for managing application settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings.
    fn get_settings(&self) -> Result<Settings>;

    /// Persist the full settings blob.
    async fn update_settings(&self, new_settings: &Settings) -> Result<()>;
}
