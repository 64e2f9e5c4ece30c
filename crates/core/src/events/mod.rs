//! Events module - models, generators, store and orchestration.

mod events_model;
mod events_service;
mod events_store;
mod generators;

pub use events_model::{
    is_generated_id, Event, EventCandidate, EventKind, NewUserEvent, ASSET_CONTRIB_PREFIX,
    CONTRIB_ROOM_PREFIX, GENERATED_ID_PREFIXES, MATURITY_PREFIX, REBALANCE_PREFIX,
    STALE_VALUATION_PREFIX,
};
pub use events_service::EventService;
pub use events_store::EventStore;
pub use generators::{
    asset_contribution_events, contribution_room_events, generate_events, maturity_events,
    rebalance_event, stale_valuation_events, GeneratorInput,
};
