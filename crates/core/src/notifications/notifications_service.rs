//! Notification scheduling: eligibility, expansion, windowing, capping and
//! the idempotent cancel/reschedule pass.

use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDateTime};
use log::{debug, error, info};

use crate::constants::{MAX_SCHEDULED_NOTIFICATIONS, PAST_DUE_RESCHEDULE_SECS, SCHEDULE_WINDOW_DAYS};
use crate::errors::Result;
use crate::events::{Event, EventKind};
use crate::utils::at_notify_hour;

use super::notifications_model::{NotificationPreferences, NotificationRequest, PermissionStatus};
use super::notifications_traits::NotificationGatewayTrait;

/// Snapshot handed to the scheduler for one re-sync pass.
#[derive(Debug, Clone)]
pub struct NotificationSyncRequest {
    pub events: Vec<Event>,
    pub preferences: NotificationPreferences,
    pub now: NaiveDateTime,
}

/// Outcome of one pass, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Signature unchanged; nothing touched.
    Unchanged,
    /// Cancel-only pass (permission missing or notifications disabled).
    CancelledOnly,
    /// Full cancel + reschedule; carries the scheduled count.
    Rescheduled(usize),
}

/// Expands eligible events into concrete trigger items, windowed to
/// `now .. now + 90 days`, soonest first, capped at the device budget.
pub fn plan_notifications(
    events: &[Event],
    preferences: &NotificationPreferences,
    now: NaiveDateTime,
) -> Vec<NotificationRequest> {
    let mut items = Vec::new();
    if !preferences.enabled {
        return items;
    }
    let window_end = now + Duration::days(SCHEDULE_WINDOW_DAYS);
    let in_window = |trigger: NaiveDateTime| trigger >= now && trigger <= window_end;

    for event in events {
        if event.is_read || !preferences.allows(event.kind) {
            continue;
        }
        match event.kind {
            EventKind::Maturity => {
                let heads_up = event.date - Duration::days(preferences.maturity_days_before);
                if in_window(heads_up) {
                    let body = match &event.asset_name {
                        Some(name) => {
                            format!("{} matures in {} days", name, preferences.maturity_days_before)
                        }
                        None => format!("Matures in {} days", preferences.maturity_days_before),
                    };
                    items.push(NotificationRequest::new(
                        event.title.clone(),
                        body,
                        heads_up,
                        &event.id,
                    ));
                }
                if in_window(event.date) {
                    items.push(NotificationRequest::new(
                        event.title.clone(),
                        event.description.clone(),
                        event.date,
                        &event.id,
                    ));
                }
            }
            _ => {
                let mut trigger = at_notify_hour(event.date.date());
                if trigger < now {
                    // Already due: fire near-immediately instead of dropping.
                    trigger = now + Duration::seconds(PAST_DUE_RESCHEDULE_SECS);
                }
                if in_window(trigger) {
                    items.push(NotificationRequest::new(
                        event.title.clone(),
                        event.description.clone(),
                        trigger,
                        &event.id,
                    ));
                }
            }
        }
    }

    items.sort_by(|a, b| a.trigger_at.cmp(&b.trigger_at));
    items.truncate(MAX_SCHEDULED_NOTIFICATIONS);
    items
}

/// Change-detection signature: serialized preferences plus minimal event
/// summaries. Matching signatures mean the device schedule is already
/// consistent and the whole pass can be skipped.
fn sync_signature(events: &[Event], preferences: &NotificationPreferences) -> String {
    let summaries: Vec<serde_json::Value> = events
        .iter()
        .map(|e| serde_json::json!({ "id": e.id, "date": e.date, "isRead": e.is_read }))
        .collect();
    serde_json::json!({ "preferences": preferences, "events": summaries }).to_string()
}

/// Keeps the device schedule consistent with the latest derived state.
///
/// The strategy is cancel-all-ours-then-re-add rather than diffing: the
/// device store may be mutated concurrently by unrelated app code, and a
/// full re-derivation tolerates races that a diff would not.
pub struct NotificationScheduler {
    gateway: Arc<dyn NotificationGatewayTrait>,
    last_signature: Mutex<Option<String>>,
}

impl NotificationScheduler {
    pub fn new(gateway: Arc<dyn NotificationGatewayTrait>) -> Self {
        NotificationScheduler {
            gateway,
            last_signature: Mutex::new(None),
        }
    }

    /// One idempotent re-sync pass.
    ///
    /// Short-circuits on an unchanged signature, cancels everything this
    /// pipeline previously scheduled, then schedules the fresh plan unless
    /// gated by permission or the global switch. Individual gateway
    /// failures are logged and skipped.
    pub async fn sync_schedule(&self, request: &NotificationSyncRequest) -> Result<SyncOutcome> {
        let signature = sync_signature(&request.events, &request.preferences);
        {
            let mut last = self.last_signature.lock().unwrap();
            if last.as_deref() == Some(signature.as_str()) {
                debug!("Notification state unchanged; skipping re-sync");
                return Ok(SyncOutcome::Unchanged);
            }
            *last = Some(signature);
        }

        self.cancel_ours().await?;

        let permitted = matches!(
            self.gateway.permission_status().await?,
            PermissionStatus::Granted
        );
        if !permitted || !request.preferences.enabled {
            debug!(
                "Notifications gated (permission granted: {}, enabled: {}); cancel-only pass",
                permitted, request.preferences.enabled
            );
            return Ok(SyncOutcome::CancelledOnly);
        }

        let plan = plan_notifications(&request.events, &request.preferences, request.now);
        let mut scheduled = 0;
        for item in plan {
            match self.gateway.schedule(item).await {
                Ok(_) => scheduled += 1,
                Err(e) => error!("Failed to schedule notification: {}", e),
            }
        }
        info!("Scheduled {} local notifications", scheduled);
        Ok(SyncOutcome::Rescheduled(scheduled))
    }

    /// Cancels every scheduled notification carrying our payload marker.
    async fn cancel_ours(&self) -> Result<()> {
        let existing = self.gateway.scheduled_notifications().await?;
        for item in existing.iter().filter(|n| n.is_ours()) {
            if let Err(e) = self.gateway.cancel(&item.id).await {
                error!("Failed to cancel notification {}: {}", item.id, e);
            }
        }
        Ok(())
    }
}
