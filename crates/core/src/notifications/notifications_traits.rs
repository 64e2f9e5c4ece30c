//! Seam to the device local-notification API.

use async_trait::async_trait;

use crate::errors::Result;

use super::notifications_model::{NotificationRequest, PermissionStatus, ScheduledNotification};

/// Device-level local-notification gateway.
///
/// The underlying store is shared with unrelated app code; consumers must
/// only cancel items whose payload carries this pipeline's marker (see
/// [`ScheduledNotification::is_ours`]).
#[async_trait]
pub trait NotificationGatewayTrait: Send + Sync {
    async fn permission_status(&self) -> Result<PermissionStatus>;

    /// All currently scheduled notifications, ours and foreign.
    async fn scheduled_notifications(&self) -> Result<Vec<ScheduledNotification>>;

    /// Schedules a notification; returns the device-assigned id.
    async fn schedule(&self, request: NotificationRequest) -> Result<String>;

    async fn cancel(&self, id: &str) -> Result<()>;
}
