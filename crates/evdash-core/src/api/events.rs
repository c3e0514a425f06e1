use std::future::Future;

use super::client::RemoteClient;
use super::error::ApiResult;
use super::request::ApiRequest;
use crate::config::DashboardConfig;
use crate::models::{
    ApiResponse, CreateEventDto, EventId, EventResponseDto, PartialEventDto, UpdateEventDto,
};

/// Remote operations on the events collection.
pub trait EventsApi: Send + Sync {
    fn list(
        &self,
        limit: u32,
    ) -> impl Future<Output = ApiResult<ApiResponse<Vec<EventResponseDto>>>> + Send;

    fn create(
        &self,
        payload: CreateEventDto,
    ) -> impl Future<Output = ApiResult<ApiResponse<EventResponseDto>>> + Send;

    /// Full replacement of an existing event.
    fn update(
        &self,
        id: EventId,
        payload: UpdateEventDto,
    ) -> impl Future<Output = ApiResult<ApiResponse<EventResponseDto>>> + Send;

    /// Partial update of an existing event.
    fn patch(
        &self,
        id: EventId,
        payload: PartialEventDto,
    ) -> impl Future<Output = ApiResult<ApiResponse<EventResponseDto>>> + Send;

    /// Any 2xx answer counts as success; the body is ignored.
    fn delete(&self, id: EventId) -> impl Future<Output = ApiResult<()>> + Send;
}

/// [`EventsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEventsApi {
    remote: RemoteClient,
    events_url: String,
}

impl HttpEventsApi {
    pub fn new(config: &DashboardConfig) -> ApiResult<Self> {
        Ok(Self {
            remote: RemoteClient::new(config.http_timeout)?,
            events_url: config.events_url(),
        })
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    fn item_url(&self, id: EventId) -> String {
        format!("{}/{id}", self.events_url)
    }
}

impl EventsApi for HttpEventsApi {
    async fn list(&self, limit: u32) -> ApiResult<ApiResponse<Vec<EventResponseDto>>> {
        let request = ApiRequest::get(&self.events_url).with_query("limit", limit);
        self.remote.send(request).await
    }

    async fn create(&self, payload: CreateEventDto) -> ApiResult<ApiResponse<EventResponseDto>> {
        let request = ApiRequest::post(&self.events_url).with_json(&payload)?;
        self.remote.send(request).await
    }

    async fn update(
        &self,
        id: EventId,
        payload: UpdateEventDto,
    ) -> ApiResult<ApiResponse<EventResponseDto>> {
        let request = ApiRequest::put(self.item_url(id)).with_json(&payload)?;
        self.remote.send(request).await
    }

    async fn patch(
        &self,
        id: EventId,
        payload: PartialEventDto,
    ) -> ApiResult<ApiResponse<EventResponseDto>> {
        let request = ApiRequest::patch(self.item_url(id)).with_json(&payload)?;
        self.remote.send(request).await
    }

    async fn delete(&self, id: EventId) -> ApiResult<()> {
        self.remote
            .send_without_body(ApiRequest::delete(self.item_url(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::{json, Value};

    use super::*;
    use crate::api::{ApiError, FALLBACK_MESSAGE, UNEXPECTED_MESSAGE};

    #[derive(Debug, Deserialize)]
    struct ListQuery {
        limit: u32,
    }

    fn event_json(id: i64, title: &str, complete: bool) -> Value {
        json!({
            "eventId": id,
            "title": title,
            "description": "",
            "complete": complete,
            "createdAt": "2030-01-01T08:00:00.000Z",
            "updateAt": "2030-01-01T08:30:00.000Z",
            "location": "Room 4",
            "startTime": "2030-01-02T09:00:00.000Z",
            "endTime": "2030-01-02T10:00:00.000Z"
        })
    }

    async fn list_events(Query(query): Query<ListQuery>) -> Json<Value> {
        let data = (1..=3)
            .take(query.limit as usize)
            .map(|id| event_json(id, &format!("Event {id}"), false))
            .collect::<Vec<_>>();
        Json(json!({
            "status": "SUCCESS",
            "message": "ok",
            "data": data,
            "pagination": {"page": 1, "limit": query.limit, "total": 3, "total_pages": 1}
        }))
    }

    async fn create_event(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let title = body["title"].as_str().unwrap_or_default().to_string();
        (
            StatusCode::CREATED,
            Json(json!({
                "status": "SUCCESS",
                "message": "created",
                "data": event_json(42, &title, false)
            })),
        )
    }

    async fn update_event(
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if id == 13 {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "database unavailable"})),
            );
        }
        let complete = body["complete"].as_bool().unwrap_or_default();
        let title = body["title"].as_str().unwrap_or("patched").to_string();
        (
            StatusCode::OK,
            Json(json!({
                "status": "SUCCESS",
                "message": "updated",
                "data": event_json(id, &title, complete)
            })),
        )
    }

    async fn delete_event(Path(id): Path<i64>) -> (StatusCode, String) {
        match id {
            404 => (StatusCode::NOT_FOUND, r#"{"error":"Event not found"}"#.to_string()),
            500 => (StatusCode::BAD_GATEWAY, "<html>upstream</html>".to_string()),
            _ => (StatusCode::NO_CONTENT, String::new()),
        }
    }

    async fn spawn_backend() -> String {
        let router = Router::new()
            .route("/api/v1/events", get(list_events).post(create_event))
            .route(
                "/api/v1/events/{id}",
                axum::routing::put(update_event)
                    .patch(update_event)
                    .delete(delete_event),
            )
            .route("/broken/events", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let address = listener.local_addr().expect("local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{address}")
    }

    fn api_for(base: &str) -> HttpEventsApi {
        let config = DashboardConfig::default().with_api_base_url(base).unwrap();
        HttpEventsApi::new(&config).unwrap()
    }

    fn create_payload() -> CreateEventDto {
        CreateEventDto {
            title: "Launch".to_string(),
            description: String::new(),
            location: "Room 4".to_string(),
            start_time: Utc.with_ymd_and_hms(2030, 1, 2, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2030, 1, 2, 10, 0, 0).unwrap(),
            complete: false,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn list_sends_limit_and_decodes_envelope() {
        let base = spawn_backend().await;
        let api = api_for(&base);

        let response = api.list(2).await.unwrap();
        assert!(response.is_confirmed());
        assert_eq!(response.pagination.map(|page| page.limit), Some(2));
        let data = response.data.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[1].title, "Event 2");
        assert_eq!(
            data[0].update_at,
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 8, 30, 0).unwrap())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn create_returns_server_assigned_id() {
        let base = spawn_backend().await;
        let api = api_for(&base);

        let created = api.create(create_payload()).await.unwrap();
        let data = created.into_confirmed().unwrap();
        assert_eq!(data.event_id, EventId::new(42));
        assert_eq!(data.title, "Launch");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_and_patch_hit_item_url() {
        let base = spawn_backend().await;
        let api = api_for(&base);

        let payload = UpdateEventDto {
            title: "Launch".to_string(),
            description: String::new(),
            location: "Room 4".to_string(),
            start_time: Utc.with_ymd_and_hms(2030, 1, 2, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2030, 1, 2, 10, 0, 0).unwrap(),
            complete: true,
        };
        let updated = api.update(EventId::new(7), payload).await.unwrap();
        let data = updated.into_confirmed().unwrap();
        assert_eq!(data.event_id, EventId::new(7));
        assert!(data.complete);

        let patch = PartialEventDto {
            complete: Some(true),
            ..PartialEventDto::default()
        };
        let patched = api.patch(EventId::new(8), patch).await.unwrap();
        assert_eq!(patched.into_confirmed().unwrap().title, "patched");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_status_carries_server_message() {
        let base = spawn_backend().await;
        let api = api_for(&base);

        let patch = PartialEventDto::default();
        let error = api.patch(EventId::new(13), patch).await.unwrap_err();
        assert_eq!(
            error,
            ApiError::Status {
                status: 500,
                message: "database unavailable".to_string(),
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_treats_any_2xx_as_success() {
        let base = spawn_backend().await;
        let api = api_for(&base);

        api.delete(EventId::new(5)).await.unwrap();

        let missing = api.delete(EventId::new(404)).await.unwrap_err();
        assert_eq!(missing.message(), "Event not found");
        assert_eq!(missing.http_status(), Some(404));

        let upstream = api.delete(EventId::new(500)).await.unwrap_err();
        assert_eq!(upstream.message(), FALLBACK_MESSAGE);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn undecodable_body_is_unexpected_error() {
        let base = spawn_backend().await;
        let config = DashboardConfig {
            events_path: "/broken/events".to_string(),
            ..DashboardConfig::default()
        }
        .with_api_base_url(&base)
        .unwrap();
        let api = HttpEventsApi::new(&config).unwrap();

        let error = api.list(10).await.unwrap_err();
        assert_eq!(error, ApiError::decode());
        assert_eq!(error.message(), UNEXPECTED_MESSAGE);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let config = DashboardConfig {
            http_timeout: Duration::from_secs(2),
            ..DashboardConfig::default()
        }
        .with_api_base_url(&format!("http://{address}"))
        .unwrap();
        let api = HttpEventsApi::new(&config).unwrap();

        let error = api.list(10).await.unwrap_err();
        assert_eq!(error, ApiError::network());
        assert_eq!(error.to_string(), FALLBACK_MESSAGE);
    }
}
