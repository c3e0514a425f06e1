//! REST adapter for the events backend.
//!
//! [`RemoteClient`] performs single HTTP calls and folds every failure mode
//! into [`ApiError`]. [`EventsApi`] is the seam the reconciler talks to;
//! [`HttpEventsApi`] implements it over HTTP.

mod client;
mod error;
mod events;
mod request;

pub use client::RemoteClient;
pub use error::{ApiError, ApiResult, FALLBACK_MESSAGE, UNEXPECTED_MESSAGE};
pub use events::{EventsApi, HttpEventsApi};
pub use request::{ApiRequest, CallSite, RequestState};
