//! Event domain models and the deterministic id scheme.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event category; each kind drives its own description/formatting logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Maturity,
    Dividend,
    PriceAlert,
    ContributionReminder,
    Rebalance,
    StaleValuation,
}

/// Id prefix for generated maturity events.
pub const MATURITY_PREFIX: &str = "maturity_";
/// Id prefix for generated per-asset contribution events.
pub const ASSET_CONTRIB_PREFIX: &str = "assetcontrib_";
/// Id prefix for generated stale-valuation events.
pub const STALE_VALUATION_PREFIX: &str = "stalevaluation_";
/// Id prefix for generated contribution-room events.
pub const CONTRIB_ROOM_PREFIX: &str = "contrib_";
/// Id prefix for generated rebalance-review events.
pub const REBALANCE_PREFIX: &str = "rebalance_";

/// All generated-id prefixes. Anything else is user-authored.
pub const GENERATED_ID_PREFIXES: [&str; 5] = [
    MATURITY_PREFIX,
    ASSET_CONTRIB_PREFIX,
    STALE_VALUATION_PREFIX,
    CONTRIB_ROOM_PREFIX,
    REBALANCE_PREFIX,
];

/// True when the id belongs to the generated (replaceable) subset.
pub fn is_generated_id(id: &str) -> bool {
    GENERATED_ID_PREFIXES.iter().any(|prefix| id.starts_with(prefix))
}

/// A timeline event shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    /// Due/occurrence instant, local wall-clock.
    pub date: NaiveDateTime,
    pub asset_id: Option<String>,
    pub asset_name: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    /// Mutated only by the owning store, never by generators.
    pub is_read: bool,
    /// Set at insertion; not a generator output.
    pub created_at: NaiveDateTime,
}

/// Generator output: an event minus the store-owned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCandidate {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub asset_id: Option<String>,
    pub asset_name: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
}

impl EventCandidate {
    /// Materializes the candidate into a freshly inserted, unread event.
    pub fn into_event(self, created_at: NaiveDateTime) -> Event {
        Event {
            id: self.id,
            kind: self.kind,
            title: self.title,
            description: self.description,
            date: self.date,
            asset_id: self.asset_id,
            asset_name: self.asset_name,
            amount: self.amount,
            currency: self.currency,
            is_read: false,
            created_at,
        }
    }
}

/// Input model for creating a user-authored event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserEvent {
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub asset_id: Option<String>,
    pub asset_name: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
}
