//! Seam to the reactive portfolio/account store collaborator.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::assets::Asset;
use crate::errors::Result;

use super::portfolio_model::{AccountRoomTarget, RiskAnalysis};

/// Read/mutate interface over the portfolio store.
///
/// Implemented by the hosting application's persistence layer. This crate
/// derives events from the snapshot reads and performs contribution
/// mutations through the entry points below; it never owns the data.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_assets(&self) -> Result<Vec<Asset>>;

    fn get_risk_analysis(&self) -> Result<Option<RiskAnalysis>>;

    fn get_room_targets(&self) -> Result<Vec<AccountRoomTarget>>;

    /// Adds `amount` to the asset's recorded value and stamps the
    /// contribution's `last_applied_id` with `occurrence_id`.
    async fn apply_contribution(
        &self,
        asset_id: &str,
        amount: Decimal,
        occurrence_id: &str,
    ) -> Result<Asset>;

    /// Stamps the contribution's `last_validated_id` with `occurrence_id`
    /// after the user confirms it.
    async fn validate_contribution(&self, asset_id: &str, occurrence_id: &str) -> Result<Asset>;

    async fn update_asset(&self, asset: Asset) -> Result<Asset>;
}
