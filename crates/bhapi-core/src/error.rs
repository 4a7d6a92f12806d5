//! Domain error taxonomy and the mapping from transport outcomes into it.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::http_client::{HttpError, HttpResponse};

/// Header carrying the upstream throttling hint, in seconds.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Retry hint used when a 429 carries no usable `retry-after` header.
pub const DEFAULT_RETRY_AFTER_MS: u64 = 1_000;

const TOO_MANY_REQUESTS: u16 = 429;

/// Stable classification of every failure surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No credential was set when the entry was dispatched.
    ConfigurationError,
    /// The queue was full at enqueue time.
    Backpressure,
    /// Upstream answered 429; `retry_after_ms` carries the hint.
    RateLimited,
    /// Any other transport or HTTP failure.
    UpstreamError,
    /// The upstream answered but the requested record does not exist.
    NotFound,
    /// The upstream body could not be decoded into the expected shape.
    InvalidResponse,
    /// The scheduler was dropped before the entry settled.
    Closed,
}

impl ApiErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::Backpressure => "backpressure",
            Self::RateLimited => "rate_limited",
            Self::UpstreamError => "upstream_error",
            Self::NotFound => "not_found",
            Self::InvalidResponse => "invalid_response",
            Self::Closed => "closed",
        }
    }
}

impl Display for ApiErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error settled into a caller's pending response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            path: None,
            retry_after_ms: None,
            details: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::ConfigurationError, message)
    }

    pub fn missing_credential() -> Self {
        Self::configuration(
            "API key not set; call set_credential before dispatching requests",
        )
    }

    pub fn backpressure(max_queue_length: usize) -> Self {
        Self::new(
            ApiErrorKind::Backpressure,
            format!("request queue is full ({max_queue_length} pending entries)"),
        )
    }

    pub fn rate_limited(retry_after_ms: u64) -> Self {
        let mut error = Self::new(
            ApiErrorKind::RateLimited,
            format!(
                "rate limit exceeded; retry after {} seconds",
                retry_after_ms / 1_000
            ),
        );
        error.status = Some(TOO_MANY_REQUESTS);
        error.retry_after_ms = Some(retry_after_ms);
        error
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        let mut error = Self::new(ApiErrorKind::UpstreamError, message);
        error.status = status;
        error
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidResponse, message)
    }

    pub fn closed() -> Self {
        Self::new(
            ApiErrorKind::Closed,
            "request scheduler shut down before the request settled",
        )
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub const fn retry_after_ms(&self) -> Option<u64> {
        self.retry_after_ms
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::ConfigurationError => "scheduler.configuration_error",
            ApiErrorKind::Backpressure => "scheduler.backpressure",
            ApiErrorKind::RateLimited => "upstream.rate_limited",
            ApiErrorKind::UpstreamError => "upstream.error",
            ApiErrorKind::NotFound => "upstream.not_found",
            ApiErrorKind::InvalidResponse => "upstream.invalid_response",
            ApiErrorKind::Closed => "scheduler.closed",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())?;
        if let Some(status) = self.status {
            write!(f, " status={status}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " path={path}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Maps a non-2xx response into a domain error.
pub fn normalize_response(response: &HttpResponse, path: &str) -> ApiError {
    if response.status == TOO_MANY_REQUESTS {
        return ApiError::rate_limited(retry_after_ms(&response.headers)).with_path(path);
    }

    let mut error = ApiError::upstream(
        Some(response.status),
        format!("upstream returned status {}", response.status),
    )
    .with_path(path);
    let body = response.body.trim();
    if !body.is_empty() {
        error = error.with_details(body);
    }
    error
}

/// Maps a transport failure into a domain error.
pub fn normalize_transport_error(error: &HttpError, path: &str) -> ApiError {
    if error.status() == Some(TOO_MANY_REQUESTS) {
        return ApiError::rate_limited(retry_after_ms(error.headers())).with_path(path);
    }

    ApiError::upstream(error.status(), error.message()).with_path(path)
}

/// Reads the `retry-after` header (seconds) and converts it to milliseconds.
///
/// Only the leading integer is read; fractional seconds and trailing units
/// are ignored. A missing, negative or non-numeric value falls back to
/// [`DEFAULT_RETRY_AFTER_MS`].
pub fn retry_after_ms(headers: &BTreeMap<String, String>) -> u64 {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(RETRY_AFTER_HEADER))
        .and_then(|(_, value)| parse_seconds(value))
        .map(|seconds| seconds.saturating_mul(1_000))
        .unwrap_or(DEFAULT_RETRY_AFTER_MS)
}

/// Leading decimal digits, so `"5"`, `"5s"` and `"1.9"` read as 5, 5 and 1.
fn parse_seconds(value: &str) -> Option<u64> {
    let value = value.trim();
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value, |end| &value[..end]);

    digits.parse::<u64>().ok()
}

/// Rejected user input for typed request parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid region '{value}', expected one of all, us-e, eu, sea, brz, aus, us-w, jpn")]
    InvalidRegion { value: String },

    #[error("invalid ranking kind '{value}', expected one of 1v1, 2v2, seasonal")]
    InvalidRankingKind { value: String },
}

/// Invalid scheduler or client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("environment variable {name} is not a valid number: '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("api key is missing or empty; set BRAWLHALLA_API_KEY or pass one explicitly")]
    MissingApiKey,

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn retry_after_converts_seconds_to_milliseconds() {
        assert_eq!(retry_after_ms(&headers(&[("retry-after", "5")])), 5_000);
        assert_eq!(retry_after_ms(&headers(&[("Retry-After", " 2 ")])), 2_000);
    }

    #[test]
    fn retry_after_defaults_to_one_second() {
        assert_eq!(retry_after_ms(&headers(&[])), 1_000);
        assert_eq!(retry_after_ms(&headers(&[("retry-after", "soon")])), 1_000);
        assert_eq!(retry_after_ms(&headers(&[("retry-after", "-3")])), 1_000);
    }

    #[test]
    fn retry_after_truncates_fractional_seconds() {
        assert_eq!(retry_after_ms(&headers(&[("retry-after", "2.9")])), 2_000);
    }

    #[test]
    fn too_many_requests_response_becomes_rate_limited() {
        let response = HttpResponse::new(429, "slow down").with_header("Retry-After", "5");
        let error = normalize_response(&response, "player/1/stats");

        assert_eq!(error.kind(), ApiErrorKind::RateLimited);
        assert_eq!(error.retry_after_ms(), Some(5_000));
        assert_eq!(error.status(), Some(429));
        assert_eq!(error.path(), Some("player/1/stats"));
    }

    #[test]
    fn other_status_becomes_upstream_error_with_body_details() {
        let response = HttpResponse::new(503, "maintenance");
        let error = normalize_response(&response, "clan/7");

        assert_eq!(error.kind(), ApiErrorKind::UpstreamError);
        assert_eq!(error.status(), Some(503));
        assert_eq!(error.path(), Some("clan/7"));
        assert_eq!(error.details(), Some("maintenance"));
        assert_eq!(error.retry_after_ms(), None);
    }

    #[test]
    fn transport_error_with_429_status_is_rate_limited() {
        let error = HttpError::new("throttled").with_status(429);
        let normalized = normalize_transport_error(&error, "legend/all");

        assert_eq!(normalized.kind(), ApiErrorKind::RateLimited);
        assert_eq!(normalized.retry_after_ms(), Some(1_000));
    }

    #[test]
    fn transport_error_without_status_keeps_message() {
        let error = HttpError::new("connection failed: refused");
        let normalized = normalize_transport_error(&error, "legend/3");

        assert_eq!(normalized.kind(), ApiErrorKind::UpstreamError);
        assert_eq!(normalized.status(), None);
        assert_eq!(normalized.message(), "connection failed: refused");
        assert_eq!(normalized.path(), Some("legend/3"));
    }

    #[test]
    fn display_includes_code_status_and_path() {
        let error = ApiError::upstream(Some(500), "boom").with_path("clan/1");
        assert_eq!(
            error.to_string(),
            "boom (upstream.error) status=500 path=clan/1"
        );
    }
}
