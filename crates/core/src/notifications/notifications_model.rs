//! Notification preference and scheduling models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::NOTIFICATION_MARKER_KEY;
use crate::events::EventKind;

/// Device permission state for local notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionStatus {
    Granted,
    Denied,
    NotDetermined,
}

/// Per-kind opt-in flags for local notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// Global switch; off means cleanup-only scheduling passes.
    pub enabled: bool,
    pub maturity_alerts: bool,
    /// Heads-up lead time before a maturity, in days.
    pub maturity_days_before: i64,
    pub price_alerts: bool,
    pub dividend_alerts: bool,
    pub contribution_reminders: bool,
    pub stale_valuation_reminders: bool,
    /// Days after the last valuation at which a manual asset counts as stale.
    pub stale_valuation_days: i64,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            enabled: true,
            maturity_alerts: true,
            maturity_days_before: 7,
            price_alerts: true,
            dividend_alerts: true,
            contribution_reminders: true,
            stale_valuation_reminders: true,
            stale_valuation_days: 30,
        }
    }
}

impl NotificationPreferences {
    /// Per-kind opt-in. Rebalance reviews carry no dedicated flag and ride
    /// on the global switch alone.
    pub fn allows(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Maturity => self.maturity_alerts,
            EventKind::Dividend => self.dividend_alerts,
            EventKind::PriceAlert => self.price_alerts,
            EventKind::ContributionReminder => self.contribution_reminders,
            EventKind::StaleValuation => self.stale_valuation_reminders,
            EventKind::Rebalance => true,
        }
    }
}

/// One concrete item handed to the device scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub trigger_at: NaiveDateTime,
    /// Carries the ownership marker plus the source event id.
    pub payload: Value,
}

impl NotificationRequest {
    pub fn new(title: String, body: String, trigger_at: NaiveDateTime, event_id: &str) -> Self {
        NotificationRequest {
            title,
            body,
            trigger_at,
            payload: json!({ NOTIFICATION_MARKER_KEY: true, "eventId": event_id }),
        }
    }
}

/// A notification currently scheduled on the device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNotification {
    pub id: String,
    pub trigger_at: NaiveDateTime,
    pub payload: Value,
}

impl ScheduledNotification {
    /// True when this pipeline created the notification. The device store
    /// is shared with unrelated app code; foreign items are never cancelled
    /// or counted.
    pub fn is_ours(&self) -> bool {
        self.payload
            .get(NOTIFICATION_MARKER_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
