use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] evdash_core::Error),
    #[error(transparent)]
    Api(#[from] evdash_core::api::ApiError),
    #[error(transparent)]
    Config(#[from] evdash_core::config::ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid event ID: {0}")]
    InvalidEventId(String),
    #[error("Invalid {field}: {message}")]
    InvalidArgument { field: &'static str, message: String },
    #[error("Nothing to change; pass at least one field to edit")]
    NothingToEdit,
}
