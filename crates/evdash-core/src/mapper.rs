//! Conversions between domain records and backend DTOs.
//!
//! All functions here are pure and total. Field names and values pass
//! through unchanged; only the absent description is defaulted to `""` on
//! the way out.

use crate::models::{
    CreateEventDto, Event, EventDraft, EventPatch, EventResponseDto, PartialEventDto,
    UpdateEventDto,
};

/// Project a draft into the `POST` body.
pub fn to_create_payload(draft: &EventDraft) -> CreateEventDto {
    CreateEventDto {
        title: draft.title.clone(),
        description: draft.description.clone().unwrap_or_default(),
        location: draft.location.clone(),
        start_time: draft.start_time,
        end_time: draft.end_time,
        complete: draft.complete,
    }
}

/// Project a draft into the `PUT` body.
pub fn to_update_payload(draft: &EventDraft) -> UpdateEventDto {
    UpdateEventDto {
        title: draft.title.clone(),
        description: draft.description.clone().unwrap_or_default(),
        location: draft.location.clone(),
        start_time: draft.start_time,
        end_time: draft.end_time,
        complete: draft.complete,
    }
}

/// Project only the set fields of a patch into the `PATCH` body.
pub fn to_partial_payload(patch: &EventPatch) -> PartialEventDto {
    PartialEventDto {
        title: patch.title.clone(),
        description: patch.description.clone(),
        location: patch.location.clone(),
        start_time: patch.start_time,
        end_time: patch.end_time,
        complete: patch.complete,
    }
}

pub fn from_response(dto: EventResponseDto) -> Event {
    Event {
        event_id: dto.event_id,
        title: dto.title,
        description: dto.description,
        complete: dto.complete,
        created_at: dto.created_at,
        update_at: dto.update_at,
        location: dto.location,
        start_time: dto.start_time,
        end_time: dto.end_time,
    }
}

/// Element-wise [`from_response`], preserving order.
pub fn from_response_list(dtos: Vec<EventResponseDto>) -> Vec<Event> {
    dtos.into_iter().map(from_response).collect()
}
