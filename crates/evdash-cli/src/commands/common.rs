use chrono::{DateTime, Utc};
use evdash_core::api::HttpEventsApi;
use evdash_core::config::DashboardConfig;
use evdash_core::models::instant::{format_instant, parse_instant};
use evdash_core::reconciler::{Notification, NotificationKind};
use evdash_core::util::compact_text;
use evdash_core::{Dashboard, DashboardStats, Event, EventId, EventPatch};
use serde::Serialize;

use crate::cli::EditFields;
use crate::error::CliError;

pub type CliDashboard = Dashboard<HttpEventsApi>;

#[derive(Debug, Serialize)]
pub struct EventListItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub complete: bool,
    pub start_time: String,
    pub end_time: String,
    pub created_at: Option<String>,
    pub update_at: Option<String>,
    pub starts: String,
}

/// Build a dashboard and load up to `limit` events into it.
pub async fn open_dashboard(
    config: &DashboardConfig,
    limit: Option<u32>,
) -> Result<CliDashboard, CliError> {
    let api = HttpEventsApi::new(config)?;
    let dashboard = Dashboard::with_notification_ttl(api, config.notification_ttl);
    dashboard.load(limit.unwrap_or(config.list_limit)).await?;
    Ok(dashboard)
}

pub fn parse_event_id(raw: &str) -> Result<EventId, CliError> {
    raw.parse::<EventId>()
        .map_err(|_| CliError::InvalidEventId(raw.trim().to_string()))
}

pub fn parse_time(field: &'static str, raw: &str) -> Result<DateTime<Utc>, CliError> {
    parse_instant(raw).map_err(|message| CliError::InvalidArgument { field, message })
}

/// Turn edit flags into a patch; unset flags stay unset.
pub fn edit_fields_to_patch(fields: EditFields) -> Result<EventPatch, CliError> {
    let patch = EventPatch {
        title: fields.title,
        description: fields.description,
        location: fields.location,
        start_time: fields
            .start
            .as_deref()
            .map(|raw| parse_time("start time", raw))
            .transpose()?,
        end_time: fields
            .end
            .as_deref()
            .map(|raw| parse_time("end time", raw))
            .transpose()?,
        complete: fields.complete,
    };
    if patch.is_empty() {
        return Err(CliError::NothingToEdit);
    }
    Ok(patch)
}

/// Print the latest notification to stderr.
pub fn report(dashboard: &CliDashboard) {
    if let Some(notification) = dashboard.last_notification() {
        eprintln!("{}", format_notification(&notification));
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let label = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
    };
    format!("[{label}] {}", notification.message)
}

pub fn format_event_lines(events: &[Event], now: DateTime<Utc>) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let mark = if event.complete { "x" } else { " " };
            let title = truncate(&event.title, 32);
            let schedule = format_schedule(event.start_time, event.end_time);
            let starts = format_relative_time(event.start_time, now);
            format!(
                "{:>6}  [{mark}]  {title:<32}  {schedule:<28}  {starts:<10}  {}",
                event.event_id.get(),
                truncate(&event.location, 24)
            )
        })
        .collect()
}

pub fn format_event_detail(event: &Event) -> Vec<String> {
    let mut lines = vec![
        format!("ID:        {}", event.event_id),
        format!("Title:     {}", event.title),
        format!(
            "Status:    {}",
            if event.complete { "complete" } else { "pending" }
        ),
        format!("Location:  {}", event.location),
        format!(
            "When:      {}",
            format_schedule(event.start_time, event.end_time)
        ),
    ];
    if let Some(description) = event.description.as_deref().filter(|text| !text.is_empty()) {
        lines.push(format!("Notes:     {}", compact_text(description)));
    }
    if let Some(created_at) = event.created_at {
        lines.push(format!("Created:   {}", format_instant(&created_at)));
    }
    if let Some(update_at) = event.update_at {
        lines.push(format!("Updated:   {}", format_instant(&update_at)));
    }
    lines
}

pub fn format_stats(stats: &DashboardStats) -> String {
    format!(
        "{} total, {} completed, {} pending",
        stats.total, stats.completed, stats.pending
    )
}

/// `2030-06-20 09:00-10:00`, or both full timestamps when the days differ.
pub fn format_schedule(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    if start.date_naive() == end.date_naive() {
        format!("{}-{}", start.format("%Y-%m-%d %H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} - {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        )
    }
}

pub fn format_relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = at.signed_duration_since(now).num_milliseconds();
    let magnitude = diff.unsigned_abs();
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if magnitude < minute {
        return "now".to_string();
    }
    let amount = if magnitude < hour {
        format!("{}m", magnitude / minute)
    } else if magnitude < day {
        format!("{}h", magnitude / hour)
    } else if magnitude < week {
        format!("{}d", magnitude / day)
    } else if magnitude < month {
        format!("{}w", magnitude / week)
    } else if magnitude < year {
        format!("{}mo", magnitude / month)
    } else {
        format!("{}y", magnitude / year)
    };

    if diff > 0 {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}

pub fn event_to_list_item(event: &Event, now: DateTime<Utc>) -> EventListItem {
    EventListItem {
        id: event.event_id.get(),
        title: event.title.clone(),
        description: event.description.clone(),
        location: event.location.clone(),
        complete: event.complete,
        start_time: format_instant(&event.start_time),
        end_time: format_instant(&event.end_time),
        created_at: event.created_at.as_ref().map(format_instant),
        update_at: event.update_at.as_ref().map(format_instant),
        starts: format_relative_time(event.start_time, now),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut truncated = single_line
        .chars()
        .take(max_chars.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}
