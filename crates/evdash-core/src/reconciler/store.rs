use std::collections::HashSet;

use super::phase::EntityPhase;
use crate::models::{Event, EventId};

/// One slot of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub event: Event,
    pub phase: EntityPhase,
}

/// The authoritative local collection.
///
/// Ids are unique; slot order is kept across in-place replacements so an
/// entry does not jump around while its write is in flight.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    entries: Vec<Entry>,
    deleting: HashSet<EventId>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        let mut store = Self::new();
        for event in events {
            store.upsert(event, EntityPhase::Idle);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.event.event_id == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn events(&self) -> Vec<Event> {
        self.entries.iter().map(|entry| entry.event.clone()).collect()
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.event.event_id == id)
    }

    /// Replace the entry with the same id in place, or append.
    pub fn upsert(&mut self, event: Event, phase: EntityPhase) {
        match self.position(event.event_id) {
            Some(index) => self.entries[index] = Entry { event, phase },
            None => self.entries.push(Entry { event, phase }),
        }
    }

    /// Put `event` into the slot currently held by `id`.
    ///
    /// When the new record carries a different id that already exists
    /// elsewhere, that other entry is dropped so ids stay unique. Returns
    /// `false` when `id` is not present.
    pub fn replace(&mut self, id: EventId, event: Event, phase: EntityPhase) -> bool {
        let new_id = event.event_id;
        if new_id != id {
            if let Some(duplicate) = self.position(new_id) {
                if self.position(id).is_some() {
                    self.entries.remove(duplicate);
                }
            }
        }
        match self.position(id) {
            Some(index) => {
                self.entries[index] = Entry { event, phase };
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EventId) -> Option<Entry> {
        self.position(id).map(|index| self.entries.remove(index))
    }

    /// Remove an entry whose delete is about to be sent. Until
    /// [`EventStore::finish_delete`] a reload will not bring it back.
    pub fn begin_delete(&mut self, id: EventId) -> Option<Entry> {
        let removed = self.remove(id)?;
        self.deleting.insert(id);
        Some(removed)
    }

    pub fn finish_delete(&mut self, id: EventId) {
        self.deleting.remove(&id);
    }

    /// Put a previously removed event back, keeping entries ordered by id.
    pub fn restore(&mut self, event: Event, phase: EntityPhase) {
        self.upsert(event, phase);
        self.entries.sort_by_key(|entry| entry.event.event_id);
    }

    /// Swap in a freshly loaded collection.
    ///
    /// Entries with a write still in flight keep their local version, and
    /// unconfirmed creates stay in the collection.
    pub fn reload(&mut self, events: Vec<Event>) {
        let previous = std::mem::take(&mut self.entries);
        for event in events {
            if self.deleting.contains(&event.event_id) {
                continue;
            }
            let pending = previous
                .iter()
                .find(|entry| entry.event.event_id == event.event_id && entry.phase.is_pending());
            match pending {
                Some(entry) => self.upsert(entry.event.clone(), entry.phase),
                None => self.upsert(event, EntityPhase::Idle),
            }
        }
        for entry in previous {
            if entry.event.event_id.is_temp() {
                self.upsert(entry.event, entry.phase);
            }
        }
    }
}
