use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::notifications::NotificationPreferences;
use crate::settings::{Settings, SettingsRepositoryTrait};

// Define the trait for SettingsService
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, new_settings: &Settings) -> Result<()>;

    fn get_notification_preferences(&self) -> Result<NotificationPreferences>;

    async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, new_settings: &Settings) -> Result<()> {
        self.settings_repository.update_settings(new_settings).await
    }

    fn get_notification_preferences(&self) -> Result<NotificationPreferences> {
        Ok(self.settings_repository.get_settings()?.notification_preferences)
    }

    async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<()> {
        let mut settings = self.settings_repository.get_settings()?;
        settings.notification_preferences = preferences.clone();
        self.settings_repository.update_settings(&settings).await
    }
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}
