//! Settings module - models, repository trait and service.

mod settings_model;
mod settings_service;
mod settings_traits;

pub use settings_model::{PaySchedule, Settings};
pub use settings_service::{SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
