//! Canonical event list with merge/dedupe semantics.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::events_model::{is_generated_id, Event, EventCandidate};

/// Owns the merged list of user-created and generated events.
///
/// Generated events are a derived, replaceable subset: every re-sync swaps
/// them for the fresh candidate list, while read state and creation
/// timestamps carried on surviving ids are preserved.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the generated subset with `candidates`.
    ///
    /// Manually created events stay untouched; candidates whose id already
    /// exists keep their `is_read`/`created_at`; new ids are inserted
    /// unread; generated events absent from `candidates` are dropped (their
    /// occurrence fell outside its relevance window or its condition no
    /// longer holds).
    pub fn sync_generated_events(&mut self, candidates: Vec<EventCandidate>, now: NaiveDateTime) {
        let keep: HashSet<String> = candidates.iter().map(|c| c.id.clone()).collect();
        self.events.retain(|e| !is_generated_id(&e.id) || keep.contains(&e.id));

        for candidate in candidates {
            if let Some(existing) = self.events.iter_mut().find(|e| e.id == candidate.id) {
                // Refresh the derived fields, keep the store-owned ones.
                existing.kind = candidate.kind;
                existing.title = candidate.title;
                existing.description = candidate.description;
                existing.date = candidate.date;
                existing.asset_id = candidate.asset_id;
                existing.asset_name = candidate.asset_name;
                existing.amount = candidate.amount;
                existing.currency = candidate.currency;
                continue;
            }
            self.events.push(candidate.into_event(now));
        }
    }

    /// Inserts a user-authored event.
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Marks an event read. Returns false when the id is unknown.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.is_read = true;
                true
            }
            None => false,
        }
    }

    /// All events, soonest first.
    pub fn events(&self) -> Vec<Event> {
        let mut events = self.events.clone();
        events.sort_by_key(|e| e.date);
        events
    }

    pub fn unread_count(&self) -> usize {
        self.events.iter().filter(|e| !e.is_read).count()
    }
}
