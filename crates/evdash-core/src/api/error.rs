use serde::Deserialize;
use thiserror::Error;

/// Message used when a failed response carries nothing better.
pub const FALLBACK_MESSAGE: &str = "Request failed";
/// Message used when a response arrived but could not be understood.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single remote call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
    /// The request never produced a response
    #[error("{message}")]
    Network { message: String },
    /// The server answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    /// The request body could not be encoded
    #[error("{message}")]
    Encode { message: String },
    /// The response body could not be read or decoded
    #[error("{message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn network() -> Self {
        Self::Network {
            message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: message_from_body(body),
        }
    }

    pub fn decode() -> Self {
        Self::Decode {
            message: UNEXPECTED_MESSAGE.to_string(),
        }
    }

    /// The user-facing message, without status decoration.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidConfiguration(message)
            | Self::Network { message }
            | Self::Status { message, .. }
            | Self::Encode { message }
            | Self::Decode { message } => message,
        }
    }

    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Best-effort message from an error body: `message`, then `error`, then
/// the fixed fallback.
pub(crate) fn message_from_body(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|payload| payload.message.or(payload.error))
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
