//! In-memory gateway for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;

use crate::errors::Result;

use super::notifications_model::{NotificationRequest, PermissionStatus, ScheduledNotification};
use super::notifications_traits::NotificationGatewayTrait;

/// Mock gateway for tests - records scheduled notifications and honours
/// the marker-filter cancel contract.
pub struct MockNotificationGateway {
    permission: PermissionStatus,
    scheduled: Mutex<Vec<ScheduledNotification>>,
    next_id: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MockNotificationGateway {
    pub fn new(permission: PermissionStatus) -> Self {
        MockNotificationGateway {
            permission,
            scheduled: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Seeds a notification owned by another part of the app.
    pub fn seed_foreign(&self, id: &str, trigger_at: NaiveDateTime) {
        self.scheduled.lock().unwrap().push(ScheduledNotification {
            id: id.to_string(),
            trigger_at,
            payload: json!({ "foreign": true }),
        });
    }

    /// Returns the currently scheduled notifications.
    pub fn scheduled(&self) -> Vec<ScheduledNotification> {
        self.scheduled.lock().unwrap().clone()
    }

    /// Number of times the device store was listed (one per sync pass).
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationGatewayTrait for MockNotificationGateway {
    async fn permission_status(&self) -> Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn scheduled_notifications(&self) -> Result<Vec<ScheduledNotification>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.scheduled.lock().unwrap().clone())
    }

    async fn schedule(&self, request: NotificationRequest) -> Result<String> {
        let id = format!("local-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.scheduled.lock().unwrap().push(ScheduledNotification {
            id: id.clone(),
            trigger_at: request.trigger_at,
            payload: request.payload,
        });
        Ok(id)
    }

    async fn cancel(&self, id: &str) -> Result<()> {
        self.scheduled.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }
}
