//! Error normalization and surfacing tests
//!
//! Covers how upstream and transport failures are turned into `ApiError`
//! values and how those errors present themselves to callers.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use bhapi_tests::{
    normalize_response, normalize_transport_error, retry_after_ms, ApiError, ApiErrorKind, Arc,
    HttpClient, HttpError, HttpRequest, HttpResponse, RequestScheduler, SchedulerConfig,
    DEFAULT_RETRY_AFTER_MS,
};

/// Answers every call with a fixed response or transport error.
struct ScriptedClient {
    outcome: Result<HttpResponse, HttpError>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn responding(response: HttpResponse) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(response),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(error: HttpError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        })
    }
}

impl HttpClient for ScriptedClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        })
    }
}

async fn request_through(client: Arc<ScriptedClient>, path: &str) -> ApiError {
    let scheduler =
        RequestScheduler::new(SchedulerConfig::default(), client).expect("valid config");
    scheduler.set_credential("test-key");
    scheduler
        .get(path, &[])
        .await
        .expect_err("scripted failure")
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn when_upstream_answers_429_the_retry_hint_is_converted_to_milliseconds() {
    // Given: Upstream throttles with a 5 second hint
    let client = ScriptedClient::responding(
        HttpResponse::new(429, "").with_header("Retry-After", "5"),
    );

    // When: A request is made
    let error = request_through(client.clone(), "player/1/stats").await;

    // Then: The error is rate_limited with a 5000ms hint and no retry happened
    assert_eq!(error.kind(), ApiErrorKind::RateLimited);
    assert_eq!(error.status(), Some(429));
    assert_eq!(error.retry_after_ms(), Some(5_000));
    assert_eq!(error.path(), Some("player/1/stats"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn when_a_429_has_no_retry_header_the_hint_defaults_to_one_second() {
    let client = ScriptedClient::responding(HttpResponse::new(429, "slow down"));

    let error = request_through(client, "legend/all").await;

    assert_eq!(error.kind(), ApiErrorKind::RateLimited);
    assert_eq!(error.retry_after_ms(), Some(DEFAULT_RETRY_AFTER_MS));
}

#[tokio::test]
async fn when_the_transport_itself_reports_429_it_is_still_rate_limited() {
    let client = ScriptedClient::failing(
        HttpError::new("too many requests")
            .with_status(429)
            .with_header("retry-after", "2"),
    );

    let error = request_through(client, "clan/5").await;

    assert_eq!(error.kind(), ApiErrorKind::RateLimited);
    assert_eq!(error.retry_after_ms(), Some(2_000));
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn when_upstream_fails_the_error_carries_status_and_path() {
    // Given: Upstream answers 503 with a body
    let client = ScriptedClient::responding(HttpResponse::new(503, "maintenance"));

    // When: A request is made
    let error = request_through(client, "player/7/ranked").await;

    // Then: It surfaces as an upstream error with the context attached
    assert_eq!(error.kind(), ApiErrorKind::UpstreamError);
    assert_eq!(error.status(), Some(503));
    assert_eq!(error.path(), Some("player/7/ranked"));
    assert_eq!(error.details(), Some("maintenance"));
    assert_eq!(error.retry_after_ms(), None);
}

#[tokio::test]
async fn when_the_connection_fails_the_error_has_no_status() {
    let client = ScriptedClient::failing(HttpError::new("connection refused"));

    let error = request_through(client, "legend/all").await;

    assert_eq!(error.kind(), ApiErrorKind::UpstreamError);
    assert_eq!(error.status(), None);
    assert_eq!(error.message(), "connection refused");
    assert_eq!(error.path(), Some("legend/all"));
}

#[test]
fn normalizers_keep_the_path_for_every_outcome() {
    let throttled = normalize_response(&HttpResponse::new(429, ""), "a");
    let failed = normalize_response(&HttpResponse::new(500, ""), "b");
    let broken = normalize_transport_error(&HttpError::new("reset"), "c");

    assert_eq!(throttled.path(), Some("a"));
    assert_eq!(failed.path(), Some("b"));
    assert_eq!(failed.details(), None);
    assert_eq!(broken.path(), Some("c"));
}

#[test]
fn retry_hint_parsing_tolerates_odd_values() {
    let headers = |value: &str| -> BTreeMap<String, String> {
        [(String::from("retry-after"), value.to_owned())]
            .into_iter()
            .collect()
    };

    assert_eq!(retry_after_ms(&headers("0")), 0);
    assert_eq!(retry_after_ms(&headers(" 30 ")), 30_000);
    assert_eq!(retry_after_ms(&headers("1.9")), 1_000);
    assert_eq!(retry_after_ms(&headers("5s")), 5_000);
    assert_eq!(retry_after_ms(&headers("12 seconds")), 12_000);
    assert_eq!(retry_after_ms(&headers("-4")), DEFAULT_RETRY_AFTER_MS);
    assert_eq!(retry_after_ms(&headers("soon")), DEFAULT_RETRY_AFTER_MS);
    assert_eq!(retry_after_ms(&BTreeMap::new()), DEFAULT_RETRY_AFTER_MS);
}

// =============================================================================
// Presentation
// =============================================================================

#[test]
fn errors_serialize_without_empty_fields() {
    let error = ApiError::rate_limited(5_000).with_path("player/1/stats");

    let json = serde_json::to_value(&error).expect("serializable");

    assert_eq!(json["kind"], "rate_limited");
    assert_eq!(json["status"], 429);
    assert_eq!(json["retry_after_ms"], 5_000);
    assert_eq!(json["path"], "player/1/stats");
    assert!(json.get("details").is_none());
}

#[test]
fn every_kind_has_a_stable_code() {
    let cases = [
        (ApiError::missing_credential(), "scheduler.configuration_error"),
        (ApiError::backpressure(500), "scheduler.backpressure"),
        (ApiError::rate_limited(1_000), "upstream.rate_limited"),
        (ApiError::upstream(Some(500), "boom"), "upstream.error"),
        (ApiError::not_found("gone"), "upstream.not_found"),
        (ApiError::invalid_response("bad"), "upstream.invalid_response"),
        (ApiError::closed(), "scheduler.closed"),
    ];

    for (error, code) in cases {
        assert_eq!(error.code(), code);
        assert!(error.to_string().contains(code));
    }
}

#[test]
fn display_includes_status_and_path_without_the_api_key() {
    let error = ApiError::upstream(Some(403), "forbidden").with_path("player/1/stats");

    let rendered = error.to_string();

    assert_eq!(
        rendered,
        "forbidden (upstream.error) status=403 path=player/1/stats"
    );
    assert!(!rendered.contains("api_key"));
}
