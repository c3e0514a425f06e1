//! Dashboard statistics and display ordering.

use serde::Serialize;

use crate::models::Event;

/// Counts shown in the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl DashboardStats {
    pub fn from_events(events: &[Event]) -> Self {
        let total = events.len();
        let completed = events.iter().filter(|event| event.complete).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// Incomplete events first, then complete ones; each group by ascending
/// start time. The sort is stable, so equal start times keep collection order.
pub fn display_order(events: &[Event]) -> Vec<Event> {
    let mut ordered = events.to_vec();
    ordered.sort_by_key(|event| (event.complete, event.start_time));
    ordered
}
