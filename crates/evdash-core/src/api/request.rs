use reqwest::Method;
use serde::Serialize;

use super::error::{ApiError, ApiResult};

/// Description of one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|error| ApiError::Encode {
            message: format!("Failed to encode request body: {error}"),
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Lifecycle of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestState<T> {
    pub const fn loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Observable flags of one call site.
///
/// `loading` stays true while any call begun here is unsettled, `error` is
/// cleared when a call begins, and `data` keeps the last successful result
/// even after later failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite<T> {
    in_flight: usize,
    error: Option<String>,
    data: Option<T>,
}

impl<T> Default for CallSite<T> {
    fn default() -> Self {
        Self {
            in_flight: 0,
            error: None,
            data: None,
        }
    }
}

impl<T: Clone> CallSite<T> {
    pub fn begin(&mut self) -> RequestState<T> {
        self.in_flight += 1;
        self.error = None;
        RequestState::Pending
    }

    pub fn settle(&mut self, result: Result<T, String>) -> RequestState<T> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(data) => {
                self.data = Some(data.clone());
                RequestState::Ready(data)
            }
            Err(message) => {
                self.error = Some(message.clone());
                RequestState::Failed(message)
            }
        }
    }

    pub const fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}
