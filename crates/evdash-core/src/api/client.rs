use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::request::ApiRequest;
use crate::util::compact_text;

/// Thin wrapper over [`reqwest::Client`] that performs one call at a time
/// and reports every failure as an [`ApiError`].
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                ApiError::InvalidConfiguration(format!("Failed to construct HTTP client: {error}"))
            })?;
        Ok(Self { client })
    }

    /// Perform the request and decode a 2xx JSON body as `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|error| {
            tracing::debug!(
                "Failed to decode response body ({error}): {}",
                compact_text(&body)
            );
            ApiError::decode()
        })
    }

    /// Perform the request, treating any 2xx as success and ignoring the body.
    pub async fn send_without_body(&self, request: ApiRequest) -> ApiResult<()> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: ApiRequest) -> ApiResult<String> {
        let ApiRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;
        tracing::debug!("{method} {url}");

        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|error| {
            tracing::warn!("{method} {url} failed: {error}");
            ApiError::network()
        })?;

        let status = response.status();
        let text = response.text().await;
        if !status.is_success() {
            let text = text.unwrap_or_default();
            tracing::warn!(
                "{method} {url} failed with HTTP {}: {}",
                status.as_u16(),
                compact_text(&text)
            );
            return Err(ApiError::status(status.as_u16(), &text));
        }

        text.map_err(|error| {
            tracing::debug!("Failed to read response body from {url}: {error}");
            ApiError::decode()
        })
    }
}
