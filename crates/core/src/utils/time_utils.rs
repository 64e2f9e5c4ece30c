use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::NOTIFY_HOUR;

/// Current local wall-clock time.
///
/// Due-date arithmetic in this crate is local wall-clock only: instants are
/// compared as naive timestamps and no cross-timezone conversion is
/// attempted.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Anchors a date at the canonical reminder hour (09:00).
///
/// Reminder-style triggers and occurrence keys all use this anchor so that
/// repeated recomputations produce identical instants.
pub fn at_notify_hour(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(NOTIFY_HOUR, 0, 0).unwrap())
}

/// Whole-day distance from `now` to `target`, rounded up.
///
/// A target 3 days and 1 second ahead is "in 4 days"; a target 30 days in
/// the past is exactly -30.
pub fn days_until(now: NaiveDateTime, target: NaiveDateTime) -> i64 {
    let secs = (target - now).num_seconds();
    if secs > 0 {
        (secs + 86_399) / 86_400
    } else {
        // Truncation toward zero is ceil for negative distances.
        secs / 86_400
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_at_notify_hour() {
        let anchored = at_notify_hour(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(anchored.to_string(), "2025-06-15 09:00:00");
    }

    #[test]
    fn test_days_until_rounds_up() {
        let now = base();
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(now, now + Duration::days(3)), 3);
        assert_eq!(days_until(now, now + Duration::days(3) + Duration::seconds(1)), 4);
        assert_eq!(days_until(now, now + Duration::seconds(1)), 1);
    }

    #[test]
    fn test_days_until_negative_is_exact_on_whole_days() {
        let now = base();
        assert_eq!(days_until(now, now - Duration::days(30)), -30);
        assert_eq!(days_until(now, now - Duration::days(30) - Duration::seconds(1)), -30);
        assert_eq!(days_until(now, now - Duration::days(31)), -31);
    }
}
