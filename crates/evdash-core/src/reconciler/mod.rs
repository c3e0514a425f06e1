//! Optimistic state reconciliation.
//!
//! [`Dashboard`] owns the local event collection and applies every write
//! locally before the backend confirms it. A confirmed write replaces the
//! local record with the server's copy; a failed one restores the snapshot
//! taken right before the write was applied. Writes on the same id are
//! serialized through [`OperationLanes`], so a snapshot is always taken
//! after the previous write on that id has settled.

mod lanes;
mod notification;
mod phase;
mod store;


use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;

pub use lanes::{LaneGuard, OperationLanes};
pub use notification::{Notification, NotificationKind, Notifier};
pub use phase::{EntityPhase, Operation};
pub use store::{Entry, EventStore};

use crate::api::{ApiResult, CallSite, EventsApi};
use crate::error::{Error, Result};
use crate::mapper::{
    from_response, from_response_list, to_create_payload, to_partial_payload, to_update_payload,
};
use crate::models::{
    ApiResponse, Event, EventDraft, EventId, EventPatch, PartialEventDto, UpdateEventDto,
};
use crate::stats::{display_order, DashboardStats};
use crate::temp_id::TempIdGenerator;
use crate::validation::validate_draft;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3_000);

/// The events dashboard state over an [`EventsApi`].
#[derive(Debug)]
pub struct Dashboard<A> {
    api: A,
    store: Mutex<EventStore>,
    lanes: OperationLanes,
    notifier: Mutex<Notifier>,
    temp_ids: TempIdGenerator,
    listing: Mutex<CallSite<Vec<Event>>>,
}

enum RemoteWrite {
    Update(UpdateEventDto),
    Patch(PartialEventDto),
}

impl<A: EventsApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self::with_notification_ttl(api, DEFAULT_NOTIFICATION_TTL)
    }

    pub fn with_notification_ttl(api: A, ttl: Duration) -> Self {
        Self {
            api,
            store: Mutex::new(EventStore::new()),
            lanes: OperationLanes::new(),
            notifier: Mutex::new(Notifier::new(ttl)),
            temp_ids: TempIdGenerator::new(),
            listing: Mutex::new(CallSite::default()),
        }
    }

    /// Seed the collection without a round-trip.
    #[must_use]
    pub fn with_events(self, events: Vec<Event>) -> Self {
        *self.lock_store() = EventStore::from_events(events);
        self
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current collection in slot order.
    pub fn events(&self) -> Vec<Event> {
        self.lock_store().events()
    }

    pub fn event(&self, id: EventId) -> Option<Event> {
        self.lock_store().get(id).map(|entry| entry.event.clone())
    }

    pub fn phase(&self, id: EventId) -> Option<EntityPhase> {
        self.lock_store().get(id).map(|entry| entry.phase)
    }

    /// Collection in display order: pending first, then by start time.
    pub fn ordered_events(&self) -> Vec<Event> {
        display_order(&self.events())
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_events(&self.events())
    }

    /// The visible notification, if any.
    pub fn notification(&self) -> Option<Notification> {
        self.lock_notifier().current().cloned()
    }

    /// The most recent notification, even if it has expired.
    pub fn last_notification(&self) -> Option<Notification> {
        self.lock_notifier().latest().cloned()
    }

    pub fn dismiss_notification(&self) {
        self.lock_notifier().dismiss();
    }

    pub fn loading(&self) -> bool {
        self.lock_listing().loading()
    }

    pub fn load_error(&self) -> Option<String> {
        self.lock_listing().error().map(ToString::to_string)
    }

    /// Fetch the collection from the backend and merge it in.
    pub async fn load(&self, limit: u32) -> Result<Vec<Event>> {
        self.lock_listing().begin();
        tracing::debug!("Loading up to {limit} events");

        let outcome = confirm(self.api.list(limit).await).map(from_response_list);
        let settled = outcome.as_ref().cloned().map_err(ToString::to_string);
        self.lock_listing().settle(settled);

        match outcome {
            Ok(events) => {
                tracing::info!("Loaded {} events", events.len());
                self.lock_store().reload(events);
                Ok(self.events())
            }
            Err(error) => Err(self.fail("Failed to load events", error)),
        }
    }

    /// Flip the completion flag of one event.
    pub async fn toggle_complete(&self, id: EventId) -> Result<Event> {
        self.write_in_place(id, Operation::Toggle, |current| {
            let draft = current.to_draft().with_complete(!current.complete);
            let payload = to_update_payload(&draft);
            Ok((
                current.merged_with(draft, Utc::now()),
                RemoteWrite::Update(payload),
            ))
        })
        .await
    }

    /// Replace the editable fields of one event.
    pub async fn save_edit(&self, id: EventId, draft: EventDraft) -> Result<Event> {
        let draft =
            validate_draft(draft).map_err(|error| self.fail("Failed to update event", error))?;
        self.write_in_place(id, Operation::Edit, |current| {
            let payload = to_update_payload(&draft);
            Ok((
                current.merged_with(draft, Utc::now()),
                RemoteWrite::Update(payload),
            ))
        })
        .await
    }

    /// Change only the fields set in `patch`.
    pub async fn apply_patch(&self, id: EventId, patch: EventPatch) -> Result<Event> {
        if patch.is_empty() {
            return Err(self.fail(
                "Failed to update event",
                Error::Validation("Nothing to update".to_string()),
            ));
        }
        self.write_in_place(id, Operation::Patch, |current| {
            let draft = validate_draft(patch.apply_to(current.to_draft()))?;
            let payload = to_partial_payload(&patch.normalized_from(&draft));
            Ok((
                current.merged_with(draft, Utc::now()),
                RemoteWrite::Patch(payload),
            ))
        })
        .await
    }

    /// Insert a new event under a temporary id and confirm it remotely.
    pub async fn create_new(&self, draft: EventDraft) -> Result<Event> {
        let draft =
            validate_draft(draft).map_err(|error| self.fail("Failed to create event", error))?;
        let temp_id = self.temp_ids.generate();
        let _lane = self.lanes.acquire(temp_id).await;

        let payload = to_create_payload(&draft);
        self.lock_store().upsert(
            Event::from_draft(temp_id, draft),
            EntityPhase::Optimistic(Operation::Create),
        );
        self.notify(NotificationKind::Info, "Creating event...");
        tracing::info!("Created event (optimistic): {temp_id}");

        match confirm(self.api.create(payload).await) {
            Ok(dto) => {
                let created = from_response(dto);
                let phase = EntityPhase::Confirmed(Operation::Create);
                let mut store = self.lock_store();
                if !store.replace(temp_id, created.clone(), phase) {
                    store.upsert(created.clone(), phase);
                }
                drop(store);
                tracing::info!("Confirmed event {temp_id} as {}", created.event_id);
                self.notify(NotificationKind::Success, "Event created successfully");
                Ok(created)
            }
            Err(error) => {
                self.lock_store().remove(temp_id);
                tracing::warn!("Discarded unconfirmed event {temp_id}: {error}");
                Err(self.fail("Failed to create event", error))
            }
        }
    }

    /// Remove one event, restoring it if the backend refuses.
    pub async fn delete_event(&self, id: EventId) -> Result<Event> {
        let _lane = self.lanes.acquire(id).await;

        let removed = self.lock_store().begin_delete(id);
        let Some(removed) = removed else {
            return Err(self.fail("Failed to delete event", Error::NotFound(id)));
        };
        tracing::info!("Deleted event (optimistic): {id}");

        let outcome = self.api.delete(id).await;
        let mut store = self.lock_store();
        store.finish_delete(id);
        match outcome {
            Ok(()) => {
                drop(store);
                tracing::info!("Confirmed delete of event {id}");
                self.notify(NotificationKind::Success, "Event deleted successfully");
                Ok(removed.event)
            }
            Err(error) => {
                store.restore(removed.event, EntityPhase::RolledBack(Operation::Delete));
                drop(store);
                tracing::warn!("Restored event {id} after failed delete: {error}");
                Err(self.fail("Failed to delete event", Error::Api(error)))
            }
        }
    }

    async fn write_in_place(
        &self,
        id: EventId,
        operation: Operation,
        apply: impl FnOnce(&Event) -> Result<(Event, RemoteWrite)>,
    ) -> Result<Event> {
        let _lane = self.lanes.acquire(id).await;

        let prepared = {
            let mut store = self.lock_store();
            let current = store.get(id).map(|entry| entry.event.clone());
            current.ok_or(Error::NotFound(id)).and_then(|snapshot| {
                let (optimistic, write) = apply(&snapshot)?;
                store.replace(id, optimistic, EntityPhase::Optimistic(operation));
                Ok((snapshot, write))
            })
        };
        let (snapshot, write) =
            prepared.map_err(|error| self.fail("Failed to update event", error))?;
        tracing::info!("Applied {operation} to event {id} (optimistic)");

        let outcome = match write {
            RemoteWrite::Update(payload) => self.api.update(id, payload).await,
            RemoteWrite::Patch(payload) => self.api.patch(id, payload).await,
        };

        match confirm(outcome) {
            Ok(dto) => {
                let confirmed = from_response(dto);
                let phase = EntityPhase::Confirmed(operation);
                let mut store = self.lock_store();
                if !store.replace(id, confirmed.clone(), phase) {
                    store.upsert(confirmed.clone(), phase);
                }
                drop(store);
                tracing::info!("Confirmed {operation} of event {id}");
                self.notify(NotificationKind::Success, success_message(operation, &confirmed));
                Ok(confirmed)
            }
            Err(error) => {
                let phase = EntityPhase::RolledBack(operation);
                let mut store = self.lock_store();
                if !store.replace(id, snapshot.clone(), phase) {
                    store.upsert(snapshot, phase);
                }
                drop(store);
                tracing::warn!("Rolled back {operation} of event {id}: {error}");
                Err(self.fail("Failed to update event", error))
            }
        }
    }

    fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        self.lock_notifier().notify(kind, message);
    }

    /// Raise an error notification for `error` and hand it back.
    fn fail(&self, context: &str, error: Error) -> Error {
        let detail = match &error {
            Error::Api(api) => api.message().to_string(),
            other => other.to_string(),
        };
        self.notify(NotificationKind::Error, format!("{context}: {detail}"));
        error
    }

    fn lock_store(&self) -> MutexGuard<'_, EventStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_notifier(&self) -> MutexGuard<'_, Notifier> {
        self.notifier.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listing(&self) -> MutexGuard<'_, CallSite<Vec<Event>>> {
        self.listing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Turn a call outcome into the confirmed payload.
fn confirm<T>(outcome: ApiResult<ApiResponse<T>>) -> Result<T> {
    outcome?.into_confirmed().map_err(Error::Rejected)
}

fn success_message(operation: Operation, event: &Event) -> &'static str {
    match operation {
        Operation::Toggle if event.complete => "Event marked as complete",
        Operation::Toggle => "Event marked as pending",
        _ => "Event updated successfully",
    }
}
