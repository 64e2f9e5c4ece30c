//! Recurrence module - cadence descriptors and due-date arithmetic.

mod recurrence_calculator;
mod recurrence_model;

pub use recurrence_calculator::{
    biweekly_period, clamp_day_of_month, date_id, is_due, month_id, monthly_period, occurrence_id,
    parse_occurrence_anchor, period, weekly_period,
};
pub use recurrence_model::{Cadence, Frequency, SchedulePeriod};
