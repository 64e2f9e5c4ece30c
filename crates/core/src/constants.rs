/// Wall-clock hour at which reminder-style triggers fire
pub const NOTIFY_HOUR: u32 = 9;

/// Forward scheduling window, in days
pub const SCHEDULE_WINDOW_DAYS: i64 = 90;

/// Hard device budget for concurrently scheduled notifications
pub const MAX_SCHEDULED_NOTIFICATIONS: usize = 48;

/// Debounce window for notification re-sync, in milliseconds
pub const DEBOUNCE_MS: u64 = 600;

/// Delay applied when an already-due trigger is rescheduled, in seconds
pub const PAST_DUE_RESCHEDULE_SECS: i64 = 30;

/// Oldest admissible event occurrence, in days relative to now
pub const EVENT_HORIZON_PAST_DAYS: i64 = -30;

/// Furthest admissible event occurrence, in days relative to now
pub const EVENT_HORIZON_FUTURE_DAYS: i64 = 365;

/// Upper clamp for monthly schedules, avoids short-month overflow
pub const MAX_SCHEDULE_DAY_OF_MONTH: u8 = 28;

/// Payload key marking notifications owned by this pipeline
pub const NOTIFICATION_MARKER_KEY: &str = "pocketfolioEvent";

/// Risk score at or above which a portfolio review is suggested
pub const REVIEW_RISK_SCORE_THRESHOLD: u8 = 7;

/// Days ahead (from tomorrow) at which a review nudge is placed
pub const REVIEW_LEAD_DAYS: i64 = 14;
