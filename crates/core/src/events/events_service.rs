//! Event pipeline orchestration.

use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use log::{debug, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::contributions::AutoApplyService;
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{NotificationPreferences, NotificationSyncRequest};
use crate::portfolio::PortfolioRepositoryTrait;
use crate::settings::SettingsRepositoryTrait;

use super::events_model::{Event, NewUserEvent};
use super::events_store::EventStore;
use super::generators::{generate_events, GeneratorInput};

/// Drives the event pipeline: auto-apply, regenerate, merge, notify.
///
/// `recompute` is the single recomputation entry point; the hosting
/// application calls it on every relevant state change (asset edits,
/// preference changes, navigation refreshes) and renders the returned
/// timeline. Notification re-syncs are queued on the debounced worker and
/// never block the caller.
pub struct EventService {
    portfolio: Arc<dyn PortfolioRepositoryTrait>,
    settings: Arc<dyn SettingsRepositoryTrait>,
    auto_apply: AutoApplyService,
    store: Mutex<EventStore>,
    notify: mpsc::UnboundedSender<NotificationSyncRequest>,
}

impl EventService {
    pub fn new(
        portfolio: Arc<dyn PortfolioRepositoryTrait>,
        settings: Arc<dyn SettingsRepositoryTrait>,
        notify: mpsc::UnboundedSender<NotificationSyncRequest>,
    ) -> Self {
        let auto_apply = AutoApplyService::new(portfolio.clone());
        EventService {
            portfolio,
            settings,
            auto_apply,
            store: Mutex::new(EventStore::new()),
            notify,
        }
    }

    /// Re-derives the generated events from current portfolio state,
    /// merges them into the store and queues a notification re-sync.
    /// Returns the merged timeline, soonest first.
    pub async fn recompute(&self, now: NaiveDateTime) -> Result<Vec<Event>> {
        let settings = self.settings.get_settings()?;
        let mut assets = self.portfolio.get_assets()?;

        let applied = self.auto_apply.run(&assets, now).await?;
        if applied > 0 {
            debug!("Auto-applied {} recurring contributions", applied);
            // Re-read so the generators see the stamped occurrence keys.
            assets = self.portfolio.get_assets()?;
        }

        let input = GeneratorInput {
            assets,
            risk: self.portfolio.get_risk_analysis()?,
            room_targets: self.portfolio.get_room_targets()?,
            pay_schedule: settings.pay_schedule.clone(),
            stale_valuation_days: settings.notification_preferences.stale_valuation_days,
        };
        let candidates = generate_events(&input, now);
        debug!("Generated {} candidate events", candidates.len());

        let events = {
            let mut store = self.store.lock().unwrap();
            store.sync_generated_events(candidates, now);
            store.events()
        };
        self.request_notification_sync(&events, &settings.notification_preferences, now);
        Ok(events)
    }

    /// The merged timeline, soonest first.
    pub fn events(&self) -> Vec<Event> {
        self.store.lock().unwrap().events()
    }

    pub fn unread_count(&self) -> usize {
        self.store.lock().unwrap().unread_count()
    }

    /// Marks an event read and re-syncs notifications (read events are no
    /// longer eligible to fire).
    pub fn mark_read(&self, id: &str, now: NaiveDateTime) -> Result<()> {
        let events = {
            let mut store = self.store.lock().unwrap();
            if !store.mark_read(id) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Event not found: {}",
                    id
                ))));
            }
            store.events()
        };
        let preferences = self.settings.get_settings()?.notification_preferences;
        self.request_notification_sync(&events, &preferences, now);
        Ok(())
    }

    /// Inserts a user-authored event under a random id.
    pub fn add_user_event(&self, new_event: NewUserEvent, now: NaiveDateTime) -> Result<Event> {
        if new_event.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }

        let event = Event {
            id: Uuid::new_v4().to_string(),
            kind: new_event.kind,
            title: new_event.title,
            description: new_event.description,
            date: new_event.date,
            asset_id: new_event.asset_id,
            asset_name: new_event.asset_name,
            amount: new_event.amount,
            currency: new_event.currency,
            is_read: false,
            created_at: now,
        };

        let events = {
            let mut store = self.store.lock().unwrap();
            store.add_event(event.clone());
            store.events()
        };
        let preferences = self.settings.get_settings()?.notification_preferences;
        self.request_notification_sync(&events, &preferences, now);
        Ok(event)
    }

    /// Records user confirmation of a contribution occurrence, then
    /// recomputes so the needs-validation event disappears.
    pub async fn validate_contribution(
        &self,
        asset_id: &str,
        occurrence_id: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<Event>> {
        self.portfolio
            .validate_contribution(asset_id, occurrence_id)
            .await?;
        self.recompute(now).await
    }

    fn request_notification_sync(
        &self,
        events: &[Event],
        preferences: &NotificationPreferences,
        now: NaiveDateTime,
    ) {
        let request = NotificationSyncRequest {
            events: events.to_vec(),
            preferences: preferences.clone(),
            now,
        };
        if self.notify.send(request).is_err() {
            warn!("Notification worker is not running; skipping re-sync");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Asset, AssetKind, QuoteMode, RecurringContribution};
    use crate::events::EventKind;
    use crate::portfolio::{AccountRoomTarget, RiskAnalysis};
    use crate::recurrence::Frequency;
    use crate::settings::Settings;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    // ============== Mocks ==============

    struct MockPortfolioRepository {
        assets: RwLock<Vec<Asset>>,
    }

    impl MockPortfolioRepository {
        fn new(assets: Vec<Asset>) -> Self {
            Self {
                assets: RwLock::new(assets),
            }
        }
    }

    #[async_trait]
    impl PortfolioRepositoryTrait for MockPortfolioRepository {
        fn get_assets(&self) -> Result<Vec<Asset>> {
            Ok(self.assets.read().unwrap().clone())
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
            let mut assets = self.assets.write().unwrap();
            let asset = assets
                .iter_mut()
                .find(|a| a.id == asset_id)
                .ok_or_else(|| Error::Portfolio(format!("Asset not found: {}", asset_id)))?;
            asset.current_value += amount;
            if let Some(config) = asset.recurring_contribution.as_mut() {
                config.last_applied_id = Some(occurrence_id.to_string());
            }
            Ok(asset.clone())
        }

        async fn validate_contribution(&self, asset_id: &str, occurrence_id: &str) -> Result<Asset> {
            let mut assets = self.assets.write().unwrap();
            let asset = assets
                .iter_mut()
                .find(|a| a.id == asset_id)
                .ok_or_else(|| Error::Portfolio(format!("Asset not found: {}", asset_id)))?;
            if let Some(config) = asset.recurring_contribution.as_mut() {
                config.last_validated_id = Some(occurrence_id.to_string());
            }
            Ok(asset.clone())
        }

        async fn update_asset(&self, asset: Asset) -> Result<Asset> {
            Ok(asset)
        }
    }

    struct MockSettingsRepository {
        settings: Settings,
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_settings(&self) -> Result<Settings> {
            Ok(self.settings.clone())
        }

        async fn update_settings(&self, _: &Settings) -> Result<()> {
            Ok(())
        }
    }

    // ============== Helpers ==============

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn base_now() -> NaiveDateTime {
        at(2025, 6, 15, 12)
    }

    fn make_asset(id: &str, name: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: name.to_string(),
            kind: AssetKind::Bond,
            currency: "USD".to_string(),
            quote_mode: QuoteMode::Market,
            current_value: dec!(10000),
            purchase_date: None,
            maturity_date: None,
            value_history: Vec::new(),
            recurring_contribution: None,
            created_at: at(2024, 1, 1, 0),
            updated_at: None,
        }
    }

    fn make_service(
        assets: Vec<Asset>,
    ) -> (
        EventService,
        mpsc::UnboundedReceiver<NotificationSyncRequest>,
    ) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let service = EventService::new(
            Arc::new(MockPortfolioRepository::new(assets)),
            Arc::new(MockSettingsRepository {
                settings: Settings::default(),
            }),
            sender,
        );
        (service, receiver)
    }

    // ============== Tests ==============

    #[tokio::test]
    async fn test_recompute_generates_and_queues_sync() {
        let mut bond = make_asset("a1", "Acme Bond");
        bond.maturity_date = Some(base_now() + Duration::days(3));
        let (service, mut receiver) = make_service(vec![bond]);

        let events = service.recompute(base_now()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "maturity_a1");
        assert_eq!(events[0].description, "Matures in 3 days");

        let request = receiver.try_recv().unwrap();
        assert_eq!(request.events.len(), 1);
        assert_eq!(request.now, base_now());
    }

    #[tokio::test]
    async fn test_recompute_preserves_read_state_across_runs() {
        let mut bond = make_asset("a1", "Acme Bond");
        bond.maturity_date = Some(base_now() + Duration::days(3));
        let (service, _receiver) = make_service(vec![bond]);

        service.recompute(base_now()).await.unwrap();
        service.mark_read("maturity_a1", base_now()).unwrap();

        let events = service.recompute(base_now() + Duration::hours(1)).await.unwrap();
        assert!(events[0].is_read);
        assert_eq!(service.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_recompute_auto_applies_and_surfaces_validation() {
        let mut fund = make_asset("a1", "Index Fund");
        fund.recurring_contribution = Some(RecurringContribution {
            enabled: true,
            frequency: Frequency::Monthly,
            weekday: None,
            day_of_month: Some(10),
            amount: dec!(200),
            auto_apply: true,
            last_applied_id: None,
            last_validated_id: None,
        });
        let (service, _receiver) = make_service(vec![fund]);

        let events = service.recompute(base_now()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Confirm contribution to Index Fund");

        // Confirming removes the reminder until the next occurrence.
        let events = service
            .validate_contribution("a1", "2025-06", base_now())
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id_is_an_error() {
        let (service, _receiver) = make_service(Vec::new());
        let result = service.mark_read("missing", base_now());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_user_events_coexist_with_generated() {
        let mut bond = make_asset("a1", "Acme Bond");
        bond.maturity_date = Some(base_now() + Duration::days(3));
        let (service, _receiver) = make_service(vec![bond]);

        service.recompute(base_now()).await.unwrap();
        let user_event = service
            .add_user_event(
                NewUserEvent {
                    kind: EventKind::PriceAlert,
                    title: "BTC above 100k".to_string(),
                    description: "Sell a tranche".to_string(),
                    date: base_now() + Duration::days(1),
                    asset_id: None,
                    asset_name: None,
                    amount: None,
                    currency: None,
                },
                base_now(),
            )
            .unwrap();

        let events = service.recompute(base_now()).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.id == user_event.id));
    }

    #[tokio::test]
    async fn test_add_user_event_requires_title() {
        let (service, _receiver) = make_service(Vec::new());
        let result = service.add_user_event(
            NewUserEvent {
                kind: EventKind::PriceAlert,
                title: "   ".to_string(),
                description: "Sell".to_string(),
                date: base_now(),
                asset_id: None,
                asset_name: None,
                amount: None,
                currency: None,
            },
            base_now(),
        );
        assert!(result.is_err());
    }
}
