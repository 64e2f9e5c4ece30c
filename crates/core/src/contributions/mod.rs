//! Contributions module - occurrence state machine and auto-apply.

mod contributions_model;
mod contributions_service;

pub use contributions_model::{
    contribution_period, display_occurrence, occurrence_status, DisplayOccurrence,
    OccurrenceStatus,
};
pub use contributions_service::AutoApplyService;
