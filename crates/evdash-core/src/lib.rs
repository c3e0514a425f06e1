//! evdash-core - Core library for the evdash events dashboard
//!
//! This crate contains the event models, the wire mapper, the REST adapter,
//! and the optimistic state reconciler shared by every evdash front end.

pub mod api;
pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
pub mod reconciler;
pub mod stats;
pub mod temp_id;
pub mod util;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Event, EventDraft, EventId, EventPatch};
pub use reconciler::Dashboard;
pub use stats::DashboardStats;
