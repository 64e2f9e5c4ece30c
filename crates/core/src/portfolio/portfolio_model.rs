//! Portfolio-level inputs consumed by the event generators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk analysis summary supplied by the analysis collaborator.
///
/// Availability is entitlement-gated upstream; generators treat a missing
/// summary as "no review needed".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub overall_risk_score: u8,
    pub suggestions: Vec<String>,
}

/// Per-period savings target for a tax-advantaged account type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRoomTarget {
    /// Account type slug, e.g. "tfsa", "rrsp", "fhsa".
    pub account_type: String,
    pub per_period_amount: Decimal,
    pub currency: String,
    pub enabled: bool,
}
