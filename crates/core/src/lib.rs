//! Pocketfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the event-generation and notification-scheduling
//! pipeline for Pocketfolio: recurrence arithmetic, the pure event
//! generators, the merged event store and the debounced device scheduler.
//! It is platform-agnostic; persistence, the device notification API and
//! market data sit behind traits implemented by the hosting application.

pub mod assets;
pub mod constants;
pub mod contributions;
pub mod errors;
pub mod events;
pub mod notifications;
pub mod portfolio;
pub mod recurrence;
pub mod settings;
pub mod utils;

// Re-export common types from the events and notifications modules
pub use events::*;
pub use notifications::{
    NotificationGatewayTrait, NotificationPreferences, NotificationScheduler,
    NotificationSyncRequest, PermissionStatus,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
