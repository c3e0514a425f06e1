//! Event model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::instant;

/// Identifier of an event.
///
/// Server-assigned ids are positive. Negative values are temporary ids
/// generated on the client for records the server has not confirmed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this id is a client-side placeholder awaiting confirmation.
    #[must_use]
    pub const fn is_temp(self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// An event as held in the dashboard collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub complete: bool,
    /// Server-assigned creation time, absent until the first round-trip
    #[serde(
        default,
        with = "instant::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-assigned update time. The backend spells this `updateAt`.
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

impl Event {
    /// Build a local record from a draft. Timestamps stay empty.
    #[must_use]
    pub fn from_draft(event_id: EventId, draft: EventDraft) -> Self {
        Self {
            event_id,
            title: draft.title,
            description: draft.description,
            complete: draft.complete,
            created_at: None,
            update_at: None,
            location: draft.location,
            start_time: draft.start_time,
            end_time: draft.end_time,
        }
    }

    /// Project the editable fields back into a draft.
    #[must_use]
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            complete: self.complete,
        }
    }

    /// Merge a draft over this record, keeping `created_at` and stamping
    /// `update_at` with `now` as a placeholder until the server answers.
    #[must_use]
    pub fn merged_with(&self, draft: EventDraft, now: DateTime<Utc>) -> Self {
        Self {
            created_at: self.created_at,
            update_at: Some(now),
            ..Self::from_draft(self.event_id, draft)
        }
    }
}

/// Editable fields of an event, as submitted by a create or edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub complete: bool,
}

impl EventDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: location.into(),
            start_time,
            end_time,
            complete: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }
}

/// A sparse set of field changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub complete: Option<bool>,
}

impl EventPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.complete.is_none()
    }

    /// Overlay the set fields onto `draft`.
    #[must_use]
    pub fn apply_to(&self, mut draft: EventDraft) -> EventDraft {
        if let Some(title) = &self.title {
            draft.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            draft.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            draft.location.clone_from(location);
        }
        if let Some(start_time) = self.start_time {
            draft.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            draft.end_time = end_time;
        }
        if let Some(complete) = self.complete {
            draft.complete = complete;
        }
        draft
    }

    /// Restate the set fields with their values from `draft`, which is
    /// expected to be this patch applied and validated. A cleared
    /// description becomes `""`.
    #[must_use]
    pub fn normalized_from(&self, draft: &EventDraft) -> Self {
        Self {
            title: self.title.as_ref().map(|_| draft.title.clone()),
            description: self
                .description
                .as_ref()
                .map(|_| draft.description.clone().unwrap_or_default()),
            location: self.location.as_ref().map(|_| draft.location.clone()),
            start_time: self.start_time.map(|_| draft.start_time),
            end_time: self.end_time.map(|_| draft.end_time),
            complete: self.complete.map(|_| draft.complete),
        }
    }
}
