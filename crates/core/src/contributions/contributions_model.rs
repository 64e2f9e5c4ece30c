//! Recurring-contribution occurrence state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::assets::RecurringContribution;
use crate::recurrence::{self, Frequency, SchedulePeriod};

/// Lifecycle of a single contribution occurrence.
///
/// One explicit transition keyed by occurrence id replaces ad-hoc
/// comparison of the applied/validated marker strings, so the two markers
/// cannot drift into contradictory readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OccurrenceStatus {
    /// Scheduled in the future.
    Pending,
    /// Reached its due instant; nothing applied yet.
    Due,
    /// Mechanically applied, awaiting user confirmation.
    AppliedPendingValidation,
    /// Confirmed by the user; nothing left to surface.
    Validated,
}

/// Resolves the status of `occurrence_id` under `config`.
///
/// Validation outranks application: a validated occurrence stays validated
/// even while its applied marker is still set.
pub fn occurrence_status(
    config: &RecurringContribution,
    occurrence_id: &str,
    due: NaiveDateTime,
    now: NaiveDateTime,
) -> OccurrenceStatus {
    if config.last_validated_id.as_deref() == Some(occurrence_id) {
        OccurrenceStatus::Validated
    } else if config.last_applied_id.as_deref() == Some(occurrence_id) {
        OccurrenceStatus::AppliedPendingValidation
    } else if recurrence::is_due(now, due) {
        OccurrenceStatus::Due
    } else {
        OccurrenceStatus::Pending
    }
}

/// Resolves the schedule period for a contribution config.
///
/// Biweekly cadences chain from the last applied occurrence when its key
/// parses to an instant; otherwise the weekly anchor bootstraps the chain.
pub fn contribution_period(config: &RecurringContribution, now: NaiveDateTime) -> SchedulePeriod {
    let anchor = match config.frequency {
        Frequency::Biweekly => config
            .last_applied_id
            .as_deref()
            .and_then(recurrence::parse_occurrence_anchor),
        _ => None,
    };
    recurrence::period(config.cadence(), anchor, now)
}

/// The occurrence a contribution event should surface, with its status.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOccurrence {
    pub due: NaiveDateTime,
    pub occurrence_id: String,
    pub status: OccurrenceStatus,
}

/// Resolves which occurrence to surface for `config`.
///
/// A chained biweekly apply advances the period past the occurrence that
/// still awaits confirmation; that occurrence keeps being surfaced (dated
/// at its own due instant) until it is validated, after which the chained
/// future occurrence takes over.
pub fn display_occurrence(config: &RecurringContribution, now: NaiveDateTime) -> DisplayOccurrence {
    if config.frequency == Frequency::Biweekly {
        if let Some(applied) = config.last_applied_id.as_deref() {
            if config.last_validated_id.as_deref() != Some(applied) {
                if let Some(anchor) = recurrence::parse_occurrence_anchor(applied) {
                    return DisplayOccurrence {
                        due: anchor,
                        occurrence_id: applied.to_string(),
                        status: OccurrenceStatus::AppliedPendingValidation,
                    };
                }
            }
        }
    }

    let period = contribution_period(config, now);
    let occurrence_id = recurrence::occurrence_id(config.frequency, period.current);
    let status = occurrence_status(config, &occurrence_id, period.current, now);
    DisplayOccurrence {
        due: period.current,
        occurrence_id,
        status,
    }
}
