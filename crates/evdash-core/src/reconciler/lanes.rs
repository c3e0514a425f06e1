use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::EventId;

#[derive(Debug, Default)]
struct Lane {
    lock: Arc<AsyncMutex<()>>,
    users: usize,
}

/// Per-id FIFO serialization of writes.
///
/// Operations on the same id run one after another in arrival order;
/// operations on different ids do not wait for each other. A lane is
/// dropped once nothing holds it or waits on it, including waiters whose
/// `acquire` was cancelled.
#[derive(Debug, Default)]
pub struct OperationLanes {
    lanes: Mutex<HashMap<EventId, Lane>>,
}

impl OperationLanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `id`.
    pub async fn acquire(&self, id: EventId) -> LaneGuard<'_> {
        let lock = {
            let mut lanes = self.lock();
            let lane = lanes.entry(id).or_default();
            lane.users += 1;
            Arc::clone(&lane.lock)
        };
        let mut held = LaneGuard {
            lanes: self,
            id,
            guard: None,
        };
        held.guard = Some(lock.lock_owned().await);
        held
    }

    /// Number of ids that are held or waited on.
    pub fn active(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<EventId, Lane>> {
        self.lanes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive hold on one id; released on drop.
#[derive(Debug)]
pub struct LaneGuard<'a> {
    lanes: &'a OperationLanes,
    id: EventId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl LaneGuard<'_> {
    pub const fn id(&self) -> EventId {
        self.id
    }
}

impl Drop for LaneGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut lanes = self.lanes.lock();
        if let Some(lane) = lanes.get_mut(&self.id) {
            lane.users = lane.users.saturating_sub(1);
            if lane.users == 0 {
                lanes.remove(&self.id);
            }
        }
    }
}
