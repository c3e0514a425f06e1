//! Wire shapes exchanged with the events backend.
//!
//! These mirror the backend's JSON exactly, including the `updateAt`
//! spelling of the update timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::instant;
use super::EventId;

/// The only envelope status that counts as a confirmed write.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Body of `POST /events`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventDto {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "instant")]
    pub end_time: DateTime<Utc>,
    pub complete: bool,
}

/// Body of `PUT /events/{id}`; a full replacement including `complete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventDto {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "instant")]
    pub end_time: DateTime<Utc>,
    pub complete: bool,
}

/// Body of `PATCH /events/{id}`; only the present fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialEventDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        with = "instant::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "instant::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// An event as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponseDto {
    pub event_id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub complete: bool,
    #[serde(
        default,
        with = "instant::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "instant::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_at: Option<DateTime<Utc>>,
    pub location: String,
    #[serde(with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "instant")]
    pub end_time: DateTime<Utc>,
}

/// Paging metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Response envelope used by every events endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// Whether the backend confirmed the request with a payload.
    pub fn is_confirmed(&self) -> bool {
        self.status == STATUS_SUCCESS && self.data.is_some()
    }

    /// Extract the confirmed payload, or describe why it was not confirmed.
    pub fn into_confirmed(self) -> Result<T, String> {
        match self.data {
            Some(data) if self.status == STATUS_SUCCESS => Ok(data),
            _ => Err(self.rejection_message()),
        }
    }

    fn rejection_message(&self) -> String {
        let message = self.message.trim();
        if !message.is_empty() {
            message.to_string()
        } else if self.status == STATUS_SUCCESS {
            "response did not include data".to_string()
        } else {
            format!("backend answered with status {}", self.status)
        }
    }
}
