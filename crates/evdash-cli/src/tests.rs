use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use clap::Parser;
use evdash_core::config::DashboardConfig;
use evdash_core::reconciler::{Notification, NotificationKind};
use evdash_core::{DashboardStats, Event, EventDraft, EventId};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::cli::{AddArgs, Cli, Commands, EditFields};
use crate::commands::add::{add_args_to_form, run_add};
use crate::commands::common::{
    edit_fields_to_patch, format_event_lines, format_notification, format_relative_time,
    format_schedule, format_stats, parse_event_id,
};
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::toggle::run_toggle;
use crate::error::CliError;

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 4, day, hour, minute, 0).unwrap()
}

/// `YYYY-04-DD` in next year, for records that pass through validation.
fn upcoming_day(day: u32) -> String {
    format!("{}-04-{day:02}", Utc::now().year() + 1)
}

fn sample_event(id: i64, title: &str, complete: bool) -> Event {
    Event::from_draft(
        EventId::new(id),
        EventDraft::new(title, "Main hall", at(10, 9, 0), at(10, 10, 30)).with_complete(complete),
    )
}

#[test]
fn cli_parses_add_arguments() {
    let cli = Cli::try_parse_from([
        "evdash",
        "--api-url",
        "http://localhost:4000",
        "add",
        "--title",
        "Launch",
        "--location",
        "Room 2",
        "--start",
        "2031-04-10T09:00",
        "--end",
        "2031-04-10T10:00",
    ])
    .unwrap();

    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:4000"));
    let Commands::Add(args) = cli.command else {
        panic!("expected add command");
    };
    assert_eq!(args.title, "Launch");
    assert_eq!(args.description, None);
    assert!(!args.complete);
}

#[test]
fn cli_parses_edit_flags() {
    let cli = Cli::try_parse_from(["evdash", "edit", "12", "--complete", "true", "--partial"])
        .unwrap();

    let Commands::Edit {
        id,
        fields,
        partial,
    } = cli.command
    else {
        panic!("expected edit command");
    };
    assert_eq!(id, "12");
    assert_eq!(fields.complete, Some(true));
    assert!(partial);
}

#[test]
fn cli_requires_a_command() {
    assert!(Cli::try_parse_from(["evdash"]).is_err());
}

#[test]
fn parse_event_id_accepts_signed_integers() {
    assert_eq!(parse_event_id(" 42 ").unwrap(), EventId::new(42));
    assert_eq!(parse_event_id("-7").unwrap(), EventId::new(-7));
    assert!(matches!(
        parse_event_id("abc"),
        Err(CliError::InvalidEventId(id)) if id == "abc"
    ));
}

#[test]
fn edit_fields_require_a_change() {
    assert!(matches!(
        edit_fields_to_patch(EditFields::default()),
        Err(CliError::NothingToEdit)
    ));

    let patch = edit_fields_to_patch(EditFields {
        start: Some("2031-04-10T08:00".to_string()),
        location: Some("Annex".to_string()),
        ..EditFields::default()
    })
    .unwrap();
    assert_eq!(patch.start_time, Some(at(10, 8, 0)));
    assert_eq!(patch.location.as_deref(), Some("Annex"));
    assert_eq!(patch.title, None);
}

#[test]
fn edit_fields_reject_bad_times() {
    let error = edit_fields_to_patch(EditFields {
        end: Some("next week".to_string()),
        ..EditFields::default()
    })
    .unwrap_err();
    assert!(error.to_string().starts_with("Invalid end time"));
}

#[test]
fn add_form_validates_before_any_call() {
    let form = add_args_to_form(AddArgs {
        title: "Launch".to_string(),
        location: " ".to_string(),
        start: "2031-04-10T09:00".to_string(),
        end: "2031-04-10T10:00".to_string(),
        description: None,
        complete: false,
    });

    let error = form.into_draft_at(at(1, 0, 0)).unwrap_err();
    assert_eq!(error.to_string(), "Invalid event: Please enter an event location");
}

#[test]
fn schedule_collapses_same_day() {
    assert_eq!(
        format_schedule(at(10, 9, 0), at(10, 10, 30)),
        "2031-04-10 09:00-10:30"
    );
    assert_eq!(
        format_schedule(at(10, 22, 0), at(11, 1, 0)),
        "2031-04-10 22:00 - 2031-04-11 01:00"
    );
}

#[test]
fn relative_time_points_both_ways() {
    let now = at(10, 12, 0);
    assert_eq!(format_relative_time(at(10, 12, 0), now), "now");
    assert_eq!(format_relative_time(at(10, 14, 0), now), "in 2h");
    assert_eq!(format_relative_time(at(7, 12, 0), now), "3d ago");
    assert_eq!(format_relative_time(at(10, 11, 15), now), "45m ago");
}

#[test]
fn event_lines_mark_completion() {
    let events = vec![sample_event(3, "Standup", false), sample_event(12, "Retro", true)];
    let lines = format_event_lines(&events, at(9, 9, 0));

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("     3  [ ]  Standup"));
    assert!(lines[0].contains("2031-04-10 09:00-10:30"));
    assert!(lines[0].contains("in 1d"));
    assert!(lines[1].starts_with("    12  [x]  Retro"));
    assert!(lines[1].ends_with("Main hall"));
}

#[test]
fn event_lines_truncate_long_titles() {
    let long_title = "A very long event title that keeps going and going";
    let lines = format_event_lines(&[sample_event(1, long_title, false)], at(9, 9, 0));
    assert!(lines[0].contains("A very long event title that ..."));
    assert!(!lines[0].contains("going and going"));
}

#[test]
fn stats_and_notifications_render() {
    let stats = DashboardStats {
        total: 5,
        completed: 2,
        pending: 3,
    };
    assert_eq!(format_stats(&stats), "5 total, 2 completed, 3 pending");

    let now = Instant::now();
    let notification = Notification {
        sequence: 1,
        kind: NotificationKind::Error,
        message: "Failed to delete event: Request failed".to_string(),
        raised_at: now,
        expires_at: now,
    };
    assert_eq!(
        format_notification(&notification),
        "[error] Failed to delete event: Request failed"
    );
}

type Records = Arc<Mutex<Vec<Value>>>;

fn record_json(id: i64, title: &str, complete: bool) -> Value {
    json!({
        "eventId": id,
        "title": title,
        "description": "",
        "complete": complete,
        "createdAt": "2031-01-01T00:00:00.000Z",
        "updateAt": "2031-01-01T00:00:00.000Z",
        "location": "Main hall",
        "startTime": format!("{}T09:00:00.000Z", upcoming_day(10)),
        "endTime": format!("{}T10:30:00.000Z", upcoming_day(10))
    })
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({"status": "SUCCESS", "message": "ok", "data": data}))
}

async fn list_records(State(records): State<Records>) -> Json<Value> {
    let data = records.lock().unwrap().clone();
    envelope(Value::Array(data))
}

async fn create_record(State(records): State<Records>, Json(body): Json<Value>) -> Json<Value> {
    let mut records = records.lock().unwrap();
    let mut record = body;
    record["eventId"] = json!(100 + records.len());
    records.push(record.clone());
    envelope(record)
}

async fn update_record(
    State(records): State<Records>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut records = records.lock().unwrap();
    let Some(record) = records.iter_mut().find(|record| record["eventId"] == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Event not found"})),
        );
    };
    for (key, value) in body.as_object().cloned().unwrap_or_default() {
        record[key.as_str()] = value;
    }
    (StatusCode::OK, envelope(record.clone()))
}

async fn delete_record(State(records): State<Records>, Path(id): Path<i64>) -> StatusCode {
    let mut records = records.lock().unwrap();
    let before = records.len();
    records.retain(|record| record["eventId"] != id);
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn_backend(records: &Records) -> DashboardConfig {
    let router = Router::new()
        .route("/api/v1/events", get(list_records).post(create_record))
        .route(
            "/api/v1/events/{id}",
            axum::routing::put(update_record)
                .patch(update_record)
                .delete(delete_record),
        )
        .with_state(Arc::clone(records));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    DashboardConfig::default()
        .with_api_base_url(&format!("http://{address}"))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_command_updates_backend() {
    let records: Records = Arc::new(Mutex::new(vec![
        record_json(1, "Standup", false),
        record_json(2, "Retro", true),
    ]));
    let config = spawn_backend(&records).await;

    run_toggle(&config, "1").await.unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records[0]["complete"], true);
    assert_eq!(records[1]["complete"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_command_creates_record() {
    let records: Records = Arc::new(Mutex::new(Vec::new()));
    let config = spawn_backend(&records).await;

    let args = AddArgs {
        title: "Planning".to_string(),
        location: "Room 2".to_string(),
        start: format!("{}T09:00", upcoming_day(12)),
        end: format!("{}T10:00", upcoming_day(12)),
        description: Some("bring notes".to_string()),
        complete: false,
    };
    run_add(&config, args).await.unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["eventId"], 100);
    assert_eq!(records[0]["title"], "Planning");
    assert_eq!(
        records[0]["startTime"],
        format!("{}T09:00:00.000Z", upcoming_day(12))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn partial_edit_sends_only_changed_fields() {
    let records: Records = Arc::new(Mutex::new(vec![record_json(4, "Review", false)]));
    let config = spawn_backend(&records).await;

    let fields = EditFields {
        location: Some("Annex".to_string()),
        ..EditFields::default()
    };
    run_edit(&config, "4", fields, true).await.unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records[0]["location"], "Annex");
    assert_eq!(records[0]["title"], "Review");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_command_reports_missing_event() {
    let records: Records = Arc::new(Mutex::new(vec![record_json(1, "Standup", false)]));
    let config = spawn_backend(&records).await;

    let error = run_delete(&config, "9").await.unwrap_err();
    assert_eq!(error.to_string(), "Event not found: 9");

    run_delete(&config, "1").await.unwrap();
    assert!(records.lock().unwrap().is_empty());
}
