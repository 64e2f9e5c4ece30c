//! Asset domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recurrence::{Cadence, Frequency};

/// Asset category taxonomy.
///
/// Categories are descriptive, not behavioral: reminder eligibility keys
/// off the presence of a maturity date and the quote mode, never the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    #[default]
    Stock,
    Bond,
    Fund,
    Gold,
    RealEstate,
    Crypto,
    FixedIncome,
    Derivative,
    PhysicalMetal,
    Cash,
}

impl AssetKind {
    /// Returns the stable string representation (SCREAMING_SNAKE_CASE).
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "STOCK",
            AssetKind::Bond => "BOND",
            AssetKind::Fund => "FUND",
            AssetKind::Gold => "GOLD",
            AssetKind::RealEstate => "REAL_ESTATE",
            AssetKind::Crypto => "CRYPTO",
            AssetKind::FixedIncome => "FIXED_INCOME",
            AssetKind::Derivative => "DERIVATIVE",
            AssetKind::PhysicalMetal => "PHYSICAL_METAL",
            AssetKind::Cash => "CASH",
        }
    }

    /// Returns a human-readable display name for the asset kind.
    pub const fn display_name(&self) -> &'static str {
        match self {
            AssetKind::Stock => "Stock",
            AssetKind::Bond => "Bond",
            AssetKind::Fund => "Fund",
            AssetKind::Gold => "Gold",
            AssetKind::RealEstate => "Real Estate",
            AssetKind::Crypto => "Crypto",
            AssetKind::FixedIncome => "Fixed Income",
            AssetKind::Derivative => "Derivative",
            AssetKind::PhysicalMetal => "Physical Metal",
            AssetKind::Cash => "Cash",
        }
    }

    /// Parses an asset kind from its stable string.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "STOCK" => Some(AssetKind::Stock),
            "BOND" => Some(AssetKind::Bond),
            "FUND" => Some(AssetKind::Fund),
            "GOLD" => Some(AssetKind::Gold),
            "REAL_ESTATE" => Some(AssetKind::RealEstate),
            "CRYPTO" => Some(AssetKind::Crypto),
            "FIXED_INCOME" => Some(AssetKind::FixedIncome),
            "DERIVATIVE" => Some(AssetKind::Derivative),
            "PHYSICAL_METAL" => Some(AssetKind::PhysicalMetal),
            "CASH" => Some(AssetKind::Cash),
            _ => None,
        }
    }
}

/// How the asset is priced/quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteMode {
    #[default]
    Market, // Priced via market data providers
    Manual, // User-entered valuations only
}

/// One manually recorded valuation of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationEntry {
    pub date: NaiveDateTime,
    pub value: Decimal,
}

/// Recurring contribution configuration embedded on an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringContribution {
    pub enabled: bool,
    pub frequency: Frequency,
    /// 0=Sunday..6=Saturday; weekly and biweekly cadences.
    pub weekday: Option<u8>,
    /// 1..=28; monthly cadences.
    pub day_of_month: Option<u8>,
    pub amount: Decimal,
    /// Apply the contribution to the asset value when due, without
    /// waiting for user confirmation.
    pub auto_apply: bool,
    /// Occurrence key of the last mechanically applied contribution.
    pub last_applied_id: Option<String>,
    /// Occurrence key of the last user-confirmed contribution.
    pub last_validated_id: Option<String>,
}

impl RecurringContribution {
    /// Cadence descriptor for the recurrence calculator.
    pub fn cadence(&self) -> Cadence {
        match self.frequency {
            Frequency::Weekly => Cadence::Weekly {
                weekday: self.weekday.unwrap_or(0),
            },
            Frequency::Biweekly => Cadence::Biweekly {
                weekday: self.weekday.unwrap_or(0),
            },
            Frequency::Monthly => Cadence::Monthly {
                day_of_month: self.day_of_month.unwrap_or(1),
            },
        }
    }
}

/// Domain model representing an asset in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub kind: AssetKind,
    pub currency: String,
    pub quote_mode: QuoteMode,
    pub current_value: Decimal,
    pub purchase_date: Option<NaiveDateTime>,
    /// Maturity instant for bonds, term deposits and dated products.
    pub maturity_date: Option<NaiveDateTime>,
    /// Manually recorded valuations, oldest first.
    #[serde(default)]
    pub value_history: Vec<ValuationEntry>,
    pub recurring_contribution: Option<RecurringContribution>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Asset {
    /// Latest known valuation instant, following the stale-valuation
    /// fallback chain: value history, then last update, then purchase date.
    pub fn last_valuation_at(&self) -> Option<NaiveDateTime> {
        self.value_history
            .iter()
            .map(|entry| entry.date)
            .max()
            .or(self.updated_at)
            .or(self.purchase_date)
    }
}
