//! Error types for evdash-core

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::models::EventId;

/// Result type alias using evdash-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in evdash-core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Draft failed validation before any remote call was made
    #[error("Invalid event: {0}")]
    Validation(String),

    /// Event is not present in the collection
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// Transport-level failure talking to the backend
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Backend answered 2xx but did not confirm the write
    #[error("Request was not confirmed: {0}")]
    Rejected(String),

    /// Invalid runtime configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether the error happened before any local state was touched.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
