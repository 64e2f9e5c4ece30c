//! Debounced notification re-sync worker.
//!
//! Receives state snapshots via an mpsc channel and keeps only the newest
//! one inside the debounce window; a burst of rapid state changes (typing
//! in a form, bulk edits) collapses into a single cancel+schedule pass
//! using the latest snapshot. The pending slot is single-occupancy, so at
//! most one pass is in flight from this pipeline's own triggering.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::constants::DEBOUNCE_MS;

use super::notifications_service::{NotificationScheduler, NotificationSyncRequest};
use super::notifications_traits::NotificationGatewayTrait;

/// Runs the debounce loop until the channel closes and the last snapshot
/// has been processed.
pub async fn notification_worker(
    mut receiver: mpsc::UnboundedReceiver<NotificationSyncRequest>,
    scheduler: Arc<NotificationScheduler>,
) {
    let debounce = Duration::from_millis(DEBOUNCE_MS);
    let mut pending: Option<NotificationSyncRequest> = None;

    loop {
        // With an empty slot, wait indefinitely for the first snapshot.
        // With a pending snapshot, wait for a newer one or the debounce
        // timeout, whichever comes first.
        let maybe_request = if pending.is_none() {
            receiver.recv().await
        } else {
            tokio::select! {
                request = receiver.recv() => request,
                _ = tokio::time::sleep(debounce) => None,
            }
        };

        match maybe_request {
            Some(request) => {
                // Newest snapshot wins; the slot is replaced, not queued.
                pending = Some(request);
            }
            None => match pending.take() {
                Some(request) => match scheduler.sync_schedule(&request).await {
                    Ok(outcome) => debug!("Notification re-sync finished: {:?}", outcome),
                    Err(e) => warn!("Notification re-sync failed: {}", e),
                },
                None => {
                    info!("Notification worker shutting down");
                    break;
                }
            },
        }
    }
}

/// Creates the scheduler with its debounce channel and spawns the worker.
///
/// Returns the sender used to queue re-sync snapshots and the worker's
/// join handle. Dropping the sender shuts the worker down after it drains
/// the pending snapshot.
pub fn spawn_notification_worker(
    gateway: Arc<dyn NotificationGatewayTrait>,
) -> (mpsc::UnboundedSender<NotificationSyncRequest>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let scheduler = Arc::new(NotificationScheduler::new(gateway));
    let handle = tokio::spawn(notification_worker(receiver, scheduler));
    (sender, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventKind};
    use crate::notifications::testing::MockNotificationGateway;
    use crate::notifications::{NotificationPreferences, PermissionStatus};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn request_with_event(id: &str) -> NotificationSyncRequest {
        NotificationSyncRequest {
            events: vec![Event {
                id: id.to_string(),
                kind: EventKind::ContributionReminder,
                title: format!("Title {}", id),
                description: "Description".to_string(),
                date: at(2025, 6, 20, 9),
                asset_id: None,
                asset_name: None,
                amount: None,
                currency: None,
                is_read: false,
                created_at: at(2025, 6, 15, 12),
            }],
            preferences: NotificationPreferences::default(),
            now: at(2025, 6, 15, 12),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_into_one_pass_with_latest_state() {
        let gateway = Arc::new(MockNotificationGateway::new(PermissionStatus::Granted));
        let (sender, _handle) = spawn_notification_worker(gateway.clone());

        // Two changes inside the debounce window.
        sender.send(request_with_event("contrib_tfsa_2025-06-20")).unwrap();
        sender.send(request_with_event("contrib_rrsp_2025-06-20")).unwrap();

        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS * 2)).await;

        // Exactly one cancel+schedule cycle ran, with the second snapshot.
        assert_eq!(gateway.list_calls(), 1);
        let scheduled = gateway.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].payload["eventId"], "contrib_rrsp_2025-06-20");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_changes_each_get_a_pass() {
        let gateway = Arc::new(MockNotificationGateway::new(PermissionStatus::Granted));
        let (sender, _handle) = spawn_notification_worker(gateway.clone());

        sender.send(request_with_event("contrib_tfsa_2025-06-20")).unwrap();
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS * 2)).await;

        sender.send(request_with_event("contrib_rrsp_2025-06-20")).unwrap();
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS * 2)).await;

        assert_eq!(gateway.list_calls(), 2);
        // The second pass replaced the first pass's item.
        let scheduled = gateway.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].payload["eventId"], "contrib_rrsp_2025-06-20");
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_channel_drains_pending_snapshot() {
        let gateway = Arc::new(MockNotificationGateway::new(PermissionStatus::Granted));
        let (sender, handle) = spawn_notification_worker(gateway.clone());

        sender.send(request_with_event("contrib_tfsa_2025-06-20")).unwrap();
        drop(sender);

        handle.await.unwrap();
        assert_eq!(gateway.scheduled().len(), 1);
    }
}
