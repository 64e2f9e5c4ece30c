//! Pure due-date arithmetic for weekly, biweekly and monthly cadences.
//!
//! All results are anchored at 09:00 wall-clock so that comparisons and
//! occurrence keys stay stable across recomputations. "Due" means `now`
//! has reached the instant; instants compare as naive local timestamps.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};

use crate::constants::MAX_SCHEDULE_DAY_OF_MONTH;
use crate::utils::at_notify_hour;

use super::recurrence_model::{Cadence, Frequency, SchedulePeriod};

/// A schedule instant is due once `now` has reached it.
pub fn is_due(now: NaiveDateTime, due: NaiveDateTime) -> bool {
    now >= due
}

/// Clamps a monthly schedule day into 1..=28.
pub fn clamp_day_of_month(day: u8) -> u8 {
    day.clamp(1, MAX_SCHEDULE_DAY_OF_MONTH)
}

/// Resolves the period for `cadence` at `now`.
///
/// `last_applied` is only meaningful for biweekly cadences, which chain
/// from the last applied occurrence instead of a fixed anchor.
pub fn period(cadence: Cadence, last_applied: Option<NaiveDateTime>, now: NaiveDateTime) -> SchedulePeriod {
    match cadence {
        Cadence::Weekly { weekday } => weekly_period(now, weekday),
        Cadence::Biweekly { weekday } => biweekly_period(now, weekday, last_applied),
        Cadence::Monthly { day_of_month } => monthly_period(now, day_of_month),
    }
}

/// Most recent occurrence of `weekday` (0=Sunday..6=Saturday) at 09:00 on
/// or before today, and the following one.
pub fn weekly_period(now: NaiveDateTime, weekday: u8) -> SchedulePeriod {
    let target = u32::from(weekday % 7);
    let today = now.date();
    let back = (today.weekday().num_days_from_sunday() + 7 - target) % 7;
    let current = at_notify_hour(today - Duration::days(i64::from(back)));
    SchedulePeriod {
        current,
        next: current + Duration::days(7),
    }
}

/// Clamped day-of-month occurrence at 09:00 in the current month, and the
/// same day next month.
pub fn monthly_period(now: NaiveDateTime, day_of_month: u8) -> SchedulePeriod {
    let day = clamp_day_of_month(day_of_month);
    let today = now.date();
    // Day is clamped to <= 28, valid in every month.
    let current_date = NaiveDate::from_ymd_opt(today.year(), today.month(), u32::from(day))
        .unwrap_or(today);
    SchedulePeriod {
        current: at_notify_hour(current_date),
        next: at_notify_hour(current_date + Months::new(1)),
    }
}

/// Biweekly period chained from the last applied occurrence: exactly 14
/// days after it, at 09:00. Without an anchor the weekly calculation
/// bootstraps "this period" and the chain starts 14 days later.
pub fn biweekly_period(now: NaiveDateTime, weekday: u8, last_applied: Option<NaiveDateTime>) -> SchedulePeriod {
    match last_applied {
        Some(anchor) => {
            let current = at_notify_hour(anchor.date()) + Duration::days(14);
            SchedulePeriod {
                current,
                next: current + Duration::days(14),
            }
        }
        None => {
            let bootstrap = weekly_period(now, weekday);
            SchedulePeriod {
                current: bootstrap.current,
                next: bootstrap.current + Duration::days(14),
            }
        }
    }
}

/// Month occurrence key, e.g. `2025-06`.
pub fn month_id(at: NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

/// Date occurrence key, e.g. `2025-06-15`.
pub fn date_id(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Occurrence key for a resolved due date under the given frequency:
/// month keys for monthly schedules, date keys otherwise.
pub fn occurrence_id(frequency: Frequency, due: NaiveDateTime) -> String {
    match frequency {
        Frequency::Monthly => month_id(due),
        Frequency::Weekly | Frequency::Biweekly => date_id(due),
    }
}

/// Parses an occurrence key back into the instant it anchors (09:00 for
/// date keys). Accepts date keys and the full ISO timestamps found in
/// legacy biweekly chains; anything unparseable is `None` and the caller
/// skips the candidate.
pub fn parse_occurrence_anchor(key: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(key, "%Y-%m-%d") {
        return Some(at_notify_hour(date));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(key, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(key) {
        return Some(ts.naive_local());
    }
    None
}
