//! Notifications module - preferences, the device gateway seam, the
//! scheduling pass and the debounced worker.

mod notifications_model;
mod notifications_service;
mod notifications_traits;
pub mod testing;
mod worker;

pub use notifications_model::{
    NotificationPreferences, NotificationRequest, PermissionStatus, ScheduledNotification,
};
pub use notifications_service::{
    plan_notifications, NotificationScheduler, NotificationSyncRequest, SyncOutcome,
};
pub use notifications_traits::NotificationGatewayTrait;
pub use worker::{notification_worker, spawn_notification_worker};
