//! Settings domain models.

use serde::{Deserialize, Serialize};

use crate::notifications::NotificationPreferences;
use crate::recurrence::{Cadence, Frequency};

/// Global pay-cycle schedule used by the contribution-room reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySchedule {
    pub frequency: Frequency,
    /// 0=Sunday..6=Saturday; weekly and biweekly cycles.
    pub weekday: Option<u8>,
    /// 1..=28; monthly cycles.
    pub day_of_month: Option<u8>,
}

impl Default for PaySchedule {
    /// Biweekly on Friday, the most common pay cycle.
    fn default() -> Self {
        PaySchedule {
            frequency: Frequency::Biweekly,
            weekday: Some(5),
            day_of_month: None,
        }
    }
}

impl PaySchedule {
    /// Cadence descriptor for the recurrence calculator.
    pub fn cadence(&self) -> Cadence {
        match self.frequency {
            Frequency::Weekly => Cadence::Weekly {
                weekday: self.weekday.unwrap_or(5),
            },
            Frequency::Biweekly => Cadence::Biweekly {
                weekday: self.weekday.unwrap_or(5),
            },
            Frequency::Monthly => Cadence::Monthly {
                day_of_month: self.day_of_month.unwrap_or(1),
            },
        }
    }
}

/// Application settings owned by the settings repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_currency: String,
    pub pay_schedule: PaySchedule,
    pub notification_preferences: NotificationPreferences,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_currency: "USD".to_string(),
            pay_schedule: PaySchedule::default(),
            notification_preferences: NotificationPreferences::default(),
        }
    }
}
