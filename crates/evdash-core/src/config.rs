//! Runtime configuration for dashboard clients.
//!
//! Values come from `EVDASH_*` environment variables; every field has a
//! default that targets a backend on `localhost:3000`.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_EVENTS_PATH: &str = "/api/v1/events";
const DEFAULT_LIST_LIMIT: u32 = 100;
const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Scheme, host and port of the backend, without a trailing slash
    pub api_base_url: String,
    /// Collection path appended to the base URL
    pub events_path: String,
    /// Page size requested when loading the collection
    pub list_limit: u32,
    /// How long a notification stays visible
    pub notification_ttl: Duration,
    pub http_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            events_path: DEFAULT_EVENTS_PATH.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(&value_or_default(
            &lookup,
            "EVDASH_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))?;
        let events_path = normalize_events_path(&value_or_default(
            &lookup,
            "EVDASH_EVENTS_PATH",
            DEFAULT_EVENTS_PATH,
        ));

        let list_limit = parse_in_range(
            &lookup,
            "EVDASH_LIST_LIMIT",
            u64::from(DEFAULT_LIST_LIMIT),
            1..=1_000,
        )?;
        let list_limit = u32::try_from(list_limit)
            .map_err(|_| ConfigError::Invalid("EVDASH_LIST_LIMIT is out of range".to_string()))?;

        let notification_ttl_ms = parse_in_range(
            &lookup,
            "EVDASH_NOTIFICATION_TTL_MS",
            DEFAULT_NOTIFICATION_TTL_MS,
            0..=60_000,
        )?;
        let http_timeout_secs = parse_in_range(
            &lookup,
            "EVDASH_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
            1..=120,
        )?;

        Ok(Self {
            api_base_url,
            events_path,
            list_limit,
            notification_ttl: Duration::from_millis(notification_ttl_ms),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// Replace the base URL, e.g. from a command-line flag.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(raw)?;
        Ok(self)
    }

    /// Full URL of the events collection.
    pub fn events_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.events_path)
    }
}

fn value_or_default(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    normalize_text_option(lookup(name)).unwrap_or_else(|| default.to_string())
}

fn parse_in_range(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    range: std::ops::RangeInclusive<u64>,
) -> Result<u64, ConfigError> {
    let Some(raw) = normalize_text_option(lookup(name)) else {
        return Ok(default);
    };
    let invalid = || {
        ConfigError::Invalid(format!(
            "{name} must be an integer in [{}, {}]",
            range.start(),
            range.end()
        ))
    };
    let value = raw.parse::<u64>().map_err(|_| invalid())?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ConfigError::Invalid(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(&base) {
        return Err(ConfigError::Invalid(
            "API base URL must start with http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

fn normalize_events_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn defaults_target_local_backend() {
        let config = DashboardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.events_url(), "http://localhost:3000/api/v1/events");
    }

    #[test]
    fn overrides_are_normalized() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("EVDASH_API_BASE_URL", "https://events.example.com/"),
            ("EVDASH_EVENTS_PATH", "v1/events/"),
            ("EVDASH_LIST_LIMIT", "25"),
            ("EVDASH_NOTIFICATION_TTL_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.events_url(), "https://events.example.com/v1/events");
        assert_eq!(config.list_limit, 25);
        assert_eq!(config.notification_ttl, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let error = DashboardConfig::from_lookup(lookup_from(&[("EVDASH_LIST_LIMIT", "0")]))
            .unwrap_err();
        assert!(error.to_string().contains("EVDASH_LIST_LIMIT"));

        let error =
            DashboardConfig::from_lookup(lookup_from(&[("EVDASH_HTTP_TIMEOUT_SECS", "soon")]))
                .unwrap_err();
        assert!(error.to_string().contains("EVDASH_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let error =
            DashboardConfig::from_lookup(lookup_from(&[("EVDASH_API_BASE_URL", "localhost:3000")]))
                .unwrap_err();
        assert!(error.to_string().contains("http://"));
        assert!(DashboardConfig::default()
            .with_api_base_url("ftp://example.com")
            .is_err());
    }
}
