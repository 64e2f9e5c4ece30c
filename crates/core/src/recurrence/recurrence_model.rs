//! Cadence descriptors for recurring schedules.

use serde::{Deserialize, Serialize};

/// Recurring schedule frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Returns the stable string used in occurrence-scoped identifiers.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

/// A frequency together with its anchor parameter.
///
/// Weekly and biweekly cadences anchor on a weekday (0=Sunday..6=Saturday);
/// monthly cadences anchor on a day-of-month, clamped to 1..=28 by the
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cadence {
    Weekly { weekday: u8 },
    Biweekly { weekday: u8 },
    Monthly { day_of_month: u8 },
}

impl Cadence {
    pub const fn frequency(&self) -> Frequency {
        match self {
            Cadence::Weekly { .. } => Frequency::Weekly,
            Cadence::Biweekly { .. } => Frequency::Biweekly,
            Cadence::Monthly { .. } => Frequency::Monthly,
        }
    }
}

/// A resolved schedule period: the most recent past-or-current occurrence
/// ("this period") and the one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePeriod {
    pub current: chrono::NaiveDateTime,
    pub next: chrono::NaiveDateTime,
}
