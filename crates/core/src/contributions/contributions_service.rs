//! Auto-apply side effect for recurring contributions.

use std::sync::Arc;

use chrono::NaiveDateTime;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::assets::Asset;
use crate::errors::Result;
use crate::portfolio::PortfolioRepositoryTrait;
use crate::recurrence;

use super::contributions_model::{contribution_period, occurrence_status, OccurrenceStatus};

/// Applies due auto-contributions through the portfolio store.
///
/// Shares the occurrence-id derivation with the contribution event
/// generator, so the "needs validation" state the generator surfaces always
/// matches what was actually applied.
pub struct AutoApplyService {
    portfolio: Arc<dyn PortfolioRepositoryTrait>,
}

impl AutoApplyService {
    pub fn new(portfolio: Arc<dyn PortfolioRepositoryTrait>) -> Self {
        AutoApplyService { portfolio }
    }

    /// Applies every due, not-yet-applied auto contribution and stamps its
    /// occurrence key. Returns the number of contributions applied.
    ///
    /// Failures on individual assets are logged and skipped; one broken
    /// asset never blocks the rest of the pass.
    pub async fn run(&self, assets: &[Asset], now: NaiveDateTime) -> Result<usize> {
        let mut applied = 0;
        for asset in assets {
            let Some(config) = asset.recurring_contribution.as_ref() else {
                continue;
            };
            if !config.enabled || !config.auto_apply || config.amount <= Decimal::ZERO {
                continue;
            }

            let period = contribution_period(config, now);
            let occurrence_id = recurrence::occurrence_id(config.frequency, period.current);
            if occurrence_status(config, &occurrence_id, period.current, now) != OccurrenceStatus::Due {
                continue;
            }

            debug!(
                "Auto-applying contribution for asset {} (occurrence {})",
                asset.id, occurrence_id
            );
            match self
                .portfolio
                .apply_contribution(&asset.id, config.amount, &occurrence_id)
                .await
            {
                Ok(_) => applied += 1,
                Err(e) => {
                    warn!("Failed to auto-apply contribution for asset {}: {}", asset.id, e);
                }
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKind, QuoteMode, RecurringContribution};
    use crate::portfolio::{AccountRoomTarget, RiskAnalysis};
    use crate::recurrence::Frequency;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct MockPortfolioRepository {
        applied: Mutex<Vec<(String, Decimal, String)>>,
    }

    impl MockPortfolioRepository {
        fn new() -> Self {
            Self { applied: Mutex::new(Vec::new()) }
        }

        fn applied(&self) -> Vec<(String, Decimal, String)> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PortfolioRepositoryTrait for MockPortfolioRepository {
        fn get_assets(&self) -> Result<Vec<Asset>> {
            Ok(Vec::new())
        }

        fn get_risk_analysis(&self) -> Result<Option<RiskAnalysis>> {
            Ok(None)
        }

        fn get_room_targets(&self) -> Result<Vec<AccountRoomTarget>> {
            Ok(Vec::new())
        }

        async fn apply_contribution(
            &self,
            asset_id: &str,
            amount: Decimal,
            occurrence_id: &str,
        ) -> Result<Asset> {
            self.applied.lock().unwrap().push((
                asset_id.to_string(),
                amount,
                occurrence_id.to_string(),
            ));
            Ok(make_asset("applied", None))
        }

        async fn validate_contribution(&self, _: &str, _: &str) -> Result<Asset> {
            unimplemented!()
        }

        async fn update_asset(&self, _: Asset) -> Result<Asset> {
            unimplemented!()
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn make_asset(id: &str, config: Option<RecurringContribution>) -> Asset {
        Asset {
            id: id.to_string(),
            name: format!("Asset {}", id),
            kind: AssetKind::Fund,
            currency: "USD".to_string(),
            quote_mode: QuoteMode::Market,
            current_value: dec!(1000),
            purchase_date: None,
            maturity_date: None,
            value_history: Vec::new(),
            recurring_contribution: config,
            created_at: at(2024, 1, 1, 0),
            updated_at: None,
        }
    }

    fn monthly_auto(day: u8) -> RecurringContribution {
        RecurringContribution {
            enabled: true,
            frequency: Frequency::Monthly,
            weekday: None,
            day_of_month: Some(day),
            amount: dec!(200),
            auto_apply: true,
            last_applied_id: None,
            last_validated_id: None,
        }
    }

    #[tokio::test]
    async fn test_applies_due_occurrence_once() {
        let repo = Arc::new(MockPortfolioRepository::new());
        let service = AutoApplyService::new(repo.clone());
        let assets = vec![make_asset("a1", Some(monthly_auto(10)))];

        let applied = service.run(&assets, at(2025, 6, 15, 12)).await.unwrap();
        assert_eq!(applied, 1);
        assert_eq!(
            repo.applied(),
            vec![("a1".to_string(), dec!(200), "2025-06".to_string())]
        );
    }

    #[tokio::test]
    async fn test_skips_already_applied_occurrence() {
        let repo = Arc::new(MockPortfolioRepository::new());
        let service = AutoApplyService::new(repo.clone());
        let mut config = monthly_auto(10);
        config.last_applied_id = Some("2025-06".to_string());
        let assets = vec![make_asset("a1", Some(config))];

        let applied = service.run(&assets, at(2025, 6, 15, 12)).await.unwrap();
        assert_eq!(applied, 0);
        assert!(repo.applied().is_empty());
    }

    #[tokio::test]
    async fn test_skips_validated_and_not_yet_due() {
        let repo = Arc::new(MockPortfolioRepository::new());
        let service = AutoApplyService::new(repo.clone());

        let mut validated = monthly_auto(10);
        validated.last_validated_id = Some("2025-06".to_string());
        let future = monthly_auto(20);

        let assets = vec![
            make_asset("a1", Some(validated)),
            make_asset("a2", Some(future)),
        ];
        let applied = service.run(&assets, at(2025, 6, 15, 12)).await.unwrap();
        assert_eq!(applied, 0);
    }

    #[tokio::test]
    async fn test_skips_manual_and_disabled_configs() {
        let repo = Arc::new(MockPortfolioRepository::new());
        let service = AutoApplyService::new(repo.clone());

        let mut manual = monthly_auto(10);
        manual.auto_apply = false;
        let mut disabled = monthly_auto(10);
        disabled.enabled = false;
        let mut zero = monthly_auto(10);
        zero.amount = Decimal::ZERO;

        let assets = vec![
            make_asset("a1", Some(manual)),
            make_asset("a2", Some(disabled)),
            make_asset("a3", Some(zero)),
            make_asset("a4", None),
        ];
        let applied = service.run(&assets, at(2025, 6, 15, 12)).await.unwrap();
        assert_eq!(applied, 0);
    }

    #[tokio::test]
    async fn test_biweekly_chain_advances_only_when_due() {
        let repo = Arc::new(MockPortfolioRepository::new());
        let service = AutoApplyService::new(repo.clone());

        let mut config = RecurringContribution {
            enabled: true,
            frequency: Frequency::Biweekly,
            weekday: Some(0),
            day_of_month: None,
            amount: dec!(150),
            auto_apply: true,
            last_applied_id: Some("2025-06-01".to_string()),
            last_validated_id: Some("2025-06-01".to_string()),
        };

        // Chained occurrence (June 15) not yet reached.
        let assets = vec![make_asset("a1", Some(config.clone()))];
        assert_eq!(service.run(&assets, at(2025, 6, 14, 12)).await.unwrap(), 0);

        // Due once the chained date passes.
        assert_eq!(service.run(&assets, at(2025, 6, 15, 12)).await.unwrap(), 1);
        assert_eq!(repo.applied()[0].2, "2025-06-15");

        // After the store stamps the new anchor the next chain link is future.
        config.last_applied_id = Some("2025-06-15".to_string());
        let assets = vec![make_asset("a1", Some(config))];
        assert_eq!(service.run(&assets, at(2025, 6, 16, 12)).await.unwrap(), 0);
    }
}
