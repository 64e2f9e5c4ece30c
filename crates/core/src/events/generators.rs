//! Pure event generators.
//!
//! Each generator is a pure function over a portfolio state slice and a
//! reference instant. Identical inputs always regenerate identical
//! candidates, ids included; that idempotence is what lets the store merge
//! replace the generated subset without ever duplicating an occurrence.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::assets::{Asset, QuoteMode};
use crate::constants::{
    EVENT_HORIZON_FUTURE_DAYS, EVENT_HORIZON_PAST_DAYS, REVIEW_LEAD_DAYS,
    REVIEW_RISK_SCORE_THRESHOLD,
};
use crate::contributions::{display_occurrence, OccurrenceStatus};
use crate::portfolio::{AccountRoomTarget, RiskAnalysis};
use crate::recurrence::{self, SchedulePeriod};
use crate::settings::PaySchedule;
use crate::utils::{at_notify_hour, days_until, format_amount};

use super::events_model::{
    EventCandidate, EventKind, ASSET_CONTRIB_PREFIX, CONTRIB_ROOM_PREFIX, MATURITY_PREFIX,
    REBALANCE_PREFIX, STALE_VALUATION_PREFIX,
};

/// Everything the generators read: a plain snapshot, not a live store.
#[derive(Debug, Clone, Default)]
pub struct GeneratorInput {
    pub assets: Vec<Asset>,
    pub risk: Option<RiskAnalysis>,
    pub room_targets: Vec<AccountRoomTarget>,
    pub pay_schedule: PaySchedule,
    pub stale_valuation_days: i64,
}

/// Concatenation of all generators. Prefixed ids keep the id spaces
/// disjoint, so no cross-generator dedupe is needed.
pub fn generate_events(input: &GeneratorInput, now: NaiveDateTime) -> Vec<EventCandidate> {
    let mut candidates = maturity_events(&input.assets, now);
    candidates.extend(asset_contribution_events(&input.assets, now));
    candidates.extend(stale_valuation_events(&input.assets, input.stale_valuation_days, now));
    candidates.extend(contribution_room_events(&input.room_targets, &input.pay_schedule, now));
    candidates.extend(rebalance_event(&input.assets, input.risk.as_ref(), now));
    candidates
}

fn within_horizon(days: i64) -> bool {
    (EVENT_HORIZON_PAST_DAYS..=EVENT_HORIZON_FUTURE_DAYS).contains(&days)
}

/// One candidate per maturing asset whose due distance falls inside the
/// relevance horizon. Maturity does not repeat, so the asset id alone keys
/// the occurrence.
pub fn maturity_events(assets: &[Asset], now: NaiveDateTime) -> Vec<EventCandidate> {
    let mut events = Vec::new();
    for asset in assets {
        let Some(maturity) = asset.maturity_date else {
            continue;
        };
        let days = days_until(now, maturity);
        if !within_horizon(days) {
            continue;
        }
        let description = if days <= 0 {
            format!("{} has matured", asset.name)
        } else if days == 1 {
            "Matures tomorrow".to_string()
        } else if days <= 7 {
            format!("Matures in {} days", days)
        } else {
            format!("Matures on {}", maturity.format("%b %-d, %Y"))
        };
        events.push(EventCandidate {
            id: format!("{}{}", MATURITY_PREFIX, asset.id),
            kind: EventKind::Maturity,
            title: format!("{} maturity", asset.name),
            description,
            date: maturity,
            asset_id: Some(asset.id.clone()),
            asset_name: Some(asset.name.clone()),
            amount: Some(asset.current_value),
            currency: Some(asset.currency.clone()),
        });
    }
    events
}

/// One candidate per enabled recurring contribution, phrased by occurrence
/// status; a validated current occurrence is suppressed entirely.
pub fn asset_contribution_events(assets: &[Asset], now: NaiveDateTime) -> Vec<EventCandidate> {
    let mut events = Vec::new();
    for asset in assets {
        let Some(config) = asset.recurring_contribution.as_ref() else {
            continue;
        };
        if !config.enabled || config.amount <= Decimal::ZERO {
            continue;
        }

        let occurrence = display_occurrence(config, now);
        let amount_text = format_amount(config.amount, &asset.currency);
        let (title, description) = match occurrence.status {
            OccurrenceStatus::Validated => continue,
            OccurrenceStatus::AppliedPendingValidation => (
                format!("Confirm contribution to {}", asset.name),
                format!(
                    "{} was added automatically. Confirm it to keep your records accurate.",
                    amount_text
                ),
            ),
            OccurrenceStatus::Due => (
                format!("Contribution due for {}", asset.name),
                format!(
                    "Your {} contribution of {} is due.",
                    config.frequency.as_str(),
                    amount_text
                ),
            ),
            OccurrenceStatus::Pending => (
                format!("Upcoming contribution to {}", asset.name),
                format!(
                    "{} is planned for {}.",
                    amount_text,
                    occurrence.due.format("%b %-d, %Y")
                ),
            ),
        };

        events.push(EventCandidate {
            id: format!(
                "{}{}_{}_{}",
                ASSET_CONTRIB_PREFIX,
                asset.id,
                config.frequency.as_str(),
                occurrence.occurrence_id
            ),
            kind: EventKind::ContributionReminder,
            title,
            description,
            date: occurrence.due,
            asset_id: Some(asset.id.clone()),
            asset_name: Some(asset.name.clone()),
            amount: Some(config.amount),
            currency: Some(asset.currency.clone()),
        });
    }
    events
}

/// One candidate per manually-valued asset approaching (or past) its
/// stale-valuation date.
pub fn stale_valuation_events(
    assets: &[Asset],
    stale_days: i64,
    now: NaiveDateTime,
) -> Vec<EventCandidate> {
    let mut events = Vec::new();
    for asset in assets {
        if asset.quote_mode != QuoteMode::Manual {
            continue;
        }
        let last = asset.last_valuation_at().unwrap_or(now);
        let due = at_notify_hour(last.date() + Duration::days(stale_days));
        let days = days_until(now, due);
        if !within_horizon(days) {
            continue;
        }
        let description = if days <= 0 {
            format!("The valuation of {} is over {} days old.", asset.name, stale_days)
        } else {
            format!(
                "The valuation of {} becomes stale on {}.",
                asset.name,
                due.format("%b %-d, %Y")
            )
        };
        events.push(EventCandidate {
            id: format!("{}{}_{}", STALE_VALUATION_PREFIX, asset.id, recurrence::date_id(due)),
            kind: EventKind::StaleValuation,
            title: format!("Update valuation for {}", asset.name),
            description,
            date: due,
            asset_id: Some(asset.id.clone()),
            asset_name: Some(asset.name.clone()),
            amount: Some(asset.current_value),
            currency: Some(asset.currency.clone()),
        });
    }
    events
}

/// One candidate per enabled account-room target, at the next pay-cycle
/// due date. Amounts are rounded to whole currency units for display.
pub fn contribution_room_events(
    targets: &[AccountRoomTarget],
    pay_schedule: &PaySchedule,
    now: NaiveDateTime,
) -> Vec<EventCandidate> {
    let mut events = Vec::new();
    if targets.is_empty() {
        return events;
    }
    let due = pay_period(pay_schedule, now).next;
    for target in targets {
        if !target.enabled || target.per_period_amount <= Decimal::ZERO {
            continue;
        }
        let amount = target
            .per_period_amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let label = target.account_type.to_uppercase();
        events.push(EventCandidate {
            id: format!("{}{}_{}", CONTRIB_ROOM_PREFIX, target.account_type, recurrence::date_id(due)),
            kind: EventKind::ContributionReminder,
            title: format!("{} contribution", label),
            description: format!(
                "Set aside {} for your {} this pay cycle.",
                format_amount(amount, &target.currency),
                label
            ),
            date: due,
            asset_id: None,
            asset_name: None,
            amount: Some(amount),
            currency: Some(target.currency.clone()),
        });
    }
    events
}

fn pay_period(pay_schedule: &PaySchedule, now: NaiveDateTime) -> SchedulePeriod {
    recurrence::period(pay_schedule.cadence(), None, now)
}

/// At most one review nudge per calendar month, placed two weeks past
/// tomorrow, when the portfolio is non-empty and the risk summary asks for
/// attention.
pub fn rebalance_event(
    assets: &[Asset],
    risk: Option<&RiskAnalysis>,
    now: NaiveDateTime,
) -> Option<EventCandidate> {
    if assets.is_empty() {
        return None;
    }
    let risk = risk?;
    let suggestion = risk
        .suggestions
        .iter()
        .map(|s| collapse_whitespace(s))
        .find(|s| !s.is_empty());
    if suggestion.is_none() && risk.overall_risk_score < REVIEW_RISK_SCORE_THRESHOLD {
        return None;
    }

    let review = at_notify_hour(now.date() + Duration::days(1)) + Duration::days(REVIEW_LEAD_DAYS);
    Some(EventCandidate {
        id: format!("{}{}", REBALANCE_PREFIX, recurrence::month_id(review)),
        kind: EventKind::Rebalance,
        title: "Portfolio review".to_string(),
        description: suggestion
            .unwrap_or_else(|| "Review your allocation against your risk profile.".to_string()),
        date: review,
        asset_id: None,
        asset_name: None,
        amount: None,
        currency: None,
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
