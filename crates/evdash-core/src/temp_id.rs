//! Temporary ids for events that exist locally but not yet on the server.
//!
//! An id is `-(millis * 1_000_000 + random * 1_000 + counter)`: a cycling
//! counter in `0..1000`, a random draw in `0..1000` and the wall clock in
//! milliseconds. The generator also remembers every id it has handed out and
//! draws again on the rare collision, so ids never repeat within a session.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock, PoisonError};

use chrono::Utc;
use rand::Rng;

use crate::models::EventId;

const COUNTER_CYCLE: i64 = 1_000;
const RANDOM_SPAN: i64 = 1_000;

#[derive(Debug, Default)]
struct GeneratorState {
    counter: i64,
    issued: HashSet<EventId>,
}

/// Session-scoped source of negative placeholder ids.
#[derive(Debug, Default)]
pub struct TempIdGenerator {
    state: Mutex<GeneratorState>,
}

impl TempIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self) -> EventId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rng = rand::thread_rng();

        loop {
            state.counter = (state.counter + 1) % COUNTER_CYCLE;
            let millis = Utc::now().timestamp_millis().max(0);
            let random = rng.gen_range(0..RANDOM_SPAN);
            let magnitude = millis
                .saturating_mul(1_000_000)
                .saturating_add(random * 1_000 + state.counter);
            if magnitude == 0 {
                continue;
            }

            let id = EventId::new(-magnitude);
            if state.issued.insert(id) {
                return id;
            }
        }
    }

    /// Number of ids handed out so far.
    pub fn issued_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .issued
            .len()
    }
}

/// Generate an id from the process-wide generator.
pub fn generate_temp_id() -> EventId {
    static GENERATOR: OnceLock<TempIdGenerator> = OnceLock::new();
    GENERATOR.get_or_init(TempIdGenerator::new).generate()
}

pub const fn is_temp(id: EventId) -> bool {
    id.is_temp()
}
