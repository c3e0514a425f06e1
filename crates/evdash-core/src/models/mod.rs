//! Data models for evdash

mod dto;
mod event;
pub mod instant;

pub use dto::{
    ApiResponse, CreateEventDto, EventResponseDto, Pagination, PartialEventDto, UpdateEventDto,
    STATUS_SUCCESS,
};
pub use event::{Event, EventDraft, EventId, EventPatch};
