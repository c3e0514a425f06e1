//! Draft validation, run before any local mutation or remote call.

use chrono::{DateTime, Duration, Months, Utc};

use crate::error::{Error, Result};
use crate::models::instant::parse_instant;
use crate::models::EventDraft;
use crate::util::normalize_text_option;

const TITLE_MISSING: &str = "Please enter an event title";
const LOCATION_MISSING: &str = "Please enter an event location";
const START_MISSING: &str = "Please select a start date and time";
const END_MISSING: &str = "Please select an end date and time";

/// Raw form input, every field possibly missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub complete: bool,
}

impl DraftForm {
    /// Parse and validate the form against the current time.
    pub fn into_draft(self) -> Result<EventDraft> {
        self.into_draft_at(Utc::now())
    }

    pub fn into_draft_at(self, now: DateTime<Utc>) -> Result<EventDraft> {
        let title = required_text(self.title, TITLE_MISSING)?;
        let location = required_text(self.location, LOCATION_MISSING)?;
        let start_time = required_instant(self.start_time, "start", START_MISSING)?;
        let end_time = required_instant(self.end_time, "end", END_MISSING)?;

        let draft = EventDraft {
            title,
            description: self.description,
            location,
            start_time,
            end_time,
            complete: self.complete,
        };
        validate_draft_at(draft, now)
    }
}

/// Validate a draft against the current time, returning it normalized.
pub fn validate_draft(draft: EventDraft) -> Result<EventDraft> {
    validate_draft_at(draft, Utc::now())
}

/// Validate a draft; title and location are trimmed, a blank description
/// becomes `None`.
pub fn validate_draft_at(draft: EventDraft, now: DateTime<Utc>) -> Result<EventDraft> {
    let title = required_text(Some(draft.title), TITLE_MISSING)?;
    let location = required_text(Some(draft.location), LOCATION_MISSING)?;

    if draft.end_time <= draft.start_time {
        return Err(Error::Validation(
            "End date must be after start date".to_string(),
        ));
    }

    let oldest_start = now
        .checked_sub_months(Months::new(12))
        .unwrap_or_else(|| now - Duration::days(365));
    if draft.start_time < oldest_start {
        return Err(Error::Validation(
            "Start date cannot be more than one year in the past".to_string(),
        ));
    }

    Ok(EventDraft {
        title,
        description: normalize_text_option(draft.description),
        location,
        ..draft
    })
}

fn required_text(value: Option<String>, missing: &str) -> Result<String> {
    normalize_text_option(value).ok_or_else(|| Error::Validation(missing.to_string()))
}

fn required_instant(value: Option<String>, field: &str, missing: &str) -> Result<DateTime<Utc>> {
    let raw = normalize_text_option(value).ok_or_else(|| Error::Validation(missing.to_string()))?;
    parse_instant(&raw).map_err(|error| Error::Validation(format!("Invalid {field} date: {error}")))
}
