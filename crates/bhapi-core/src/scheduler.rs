//! Bounded, concurrency-capped dispatch queue in front of the upstream API.
//!
//! Every endpoint call goes through [`RequestScheduler::enqueue`], which
//! appends a queue entry and returns a [`PendingResponse`] immediately. A
//! single dispatch loop task pops entries in FIFO order while fewer than
//! `max_in_flight` calls are outstanding, attaches the credential, and hands
//! the request to the [`HttpClient`]. Each entry is settled exactly once.
//!
//! ```text
//! enqueue ──▶ [ queue (≤ max_queue_length) ] ──▶ dispatch loop ──▶ HttpClient
//!    │                                              ▲      │
//!    └────────────── Notify ────────────────────────┘      ▼
//!                                  completion ── settle + Notify
//! ```
//!
//! The loop wakes on every enqueue and every completion; a periodic tick
//! (`dispatch_tick_interval`) is only a safety net. Nothing is retried: a
//! 429 surfaces as [`ApiErrorKind::RateLimited`](crate::ApiErrorKind) with
//! the upstream retry hint and the caller decides what to do with it.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};
use std::task::{Context, Poll};
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use tokio::sync::{oneshot, Notify};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::SchedulerConfig;
use crate::error::{normalize_response, normalize_transport_error, ApiError, ConfigError};
use crate::http_client::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Query parameter the credential is sent as.
pub const CREDENTIAL_PARAM: &str = "api_key";

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;
type Outcome = Result<HttpResponse, ApiError>;

struct QueueEntry {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<String>,
    enqueued_at: Instant,
    respond: oneshot::Sender<Outcome>,
}

impl QueueEntry {
    fn settle(self, outcome: Outcome) {
        if self.respond.send(outcome).is_err() {
            debug!(path = %self.path, "caller dropped pending response before settlement");
        }
    }
}

#[derive(Default)]
struct QueueState {
    entries: VecDeque<QueueEntry>,
    in_flight: usize,
}

struct SchedulerShared {
    config: SchedulerConfig,
    transport: Arc<dyn HttpClient>,
    credential: RwLock<Option<String>>,
    state: Mutex<QueueState>,
    wake: Arc<Notify>,
    limiter: Option<DirectRateLimiter>,
}

/// Handle to a running scheduler. Clones share the same queue and credential.
///
/// The dispatch loop stops once every handle and every in-flight call is
/// gone; entries still queued at that point settle with
/// [`ApiErrorKind::Closed`](crate::ApiErrorKind::Closed).
#[derive(Clone)]
pub struct RequestScheduler {
    shared: Arc<SchedulerShared>,
}

impl RequestScheduler {
    /// Validates `config` and spawns the dispatch loop.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn new(config: SchedulerConfig, transport: Arc<dyn HttpClient>) -> Result<Self, ConfigError> {
        config.validate()?;

        let limiter = config
            .rate_limit_per_second
            .map(|limit| RateLimiter::direct(Quota::per_second(limit)));
        let tick = config.dispatch_tick_interval;
        let wake = Arc::new(Notify::new());

        let shared = Arc::new(SchedulerShared {
            config,
            transport,
            credential: RwLock::new(None),
            state: Mutex::new(QueueState::default()),
            wake: Arc::clone(&wake),
            limiter,
        });

        tokio::spawn(dispatch_loop(Arc::downgrade(&shared), wake, tick));

        Ok(Self { shared })
    }

    /// Stores the credential used for every entry dispatched from now on.
    pub fn set_credential(&self, key: impl Into<String>) {
        let mut credential = self
            .shared
            .credential
            .write()
            .expect("scheduler credential lock is not poisoned");
        *credential = Some(key.into());
    }

    /// Forgets the credential; later dispatches fail with a configuration error.
    pub fn clear_credential(&self) {
        let mut credential = self
            .shared
            .credential
            .write()
            .expect("scheduler credential lock is not poisoned");
        *credential = None;
    }

    /// Whether a credential is currently stored.
    pub fn has_credential(&self) -> bool {
        self.shared
            .credential
            .read()
            .expect("scheduler credential lock is not poisoned")
            .is_some()
    }

    /// Appends a request to the tail of the queue.
    ///
    /// Never blocks. When the queue already holds `max_queue_length` entries
    /// the returned response is already failed with
    /// [`ApiErrorKind::Backpressure`](crate::ApiErrorKind::Backpressure) and
    /// the queue is left untouched.
    pub fn enqueue(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> PendingResponse {
        let path = path.into();
        let max_queue_length = self.shared.config.max_queue_length;
        let (respond, receiver) = oneshot::channel();

        {
            let mut state = self.shared.lock_state();
            if state.entries.len() >= max_queue_length {
                drop(state);
                warn!(%method, path = %path, max_queue_length, "request queue full, rejecting");
                return PendingResponse::rejected(
                    ApiError::backpressure(max_queue_length).with_path(path),
                );
            }

            state.entries.push_back(QueueEntry {
                method,
                path,
                query,
                body,
                enqueued_at: Instant::now(),
                respond,
            });
        }

        self.shared.wake.notify_one();
        PendingResponse { receiver }
    }

    /// Enqueues a `GET` for `path` with the given query parameters.
    pub fn get(&self, path: impl Into<String>, query: &[(&str, &str)]) -> PendingResponse {
        self.enqueue(HttpMethod::Get, path, owned_query(query), None)
    }

    /// Enqueues a `POST` for `path` with an optional body.
    pub fn post(&self, path: impl Into<String>, body: Option<String>) -> PendingResponse {
        self.enqueue(HttpMethod::Post, path, Vec::new(), body)
    }

    /// Enqueues a `PUT` for `path` with an optional body.
    pub fn put(&self, path: impl Into<String>, body: Option<String>) -> PendingResponse {
        self.enqueue(HttpMethod::Put, path, Vec::new(), body)
    }

    /// Enqueues a `DELETE` for `path`.
    pub fn delete(&self, path: impl Into<String>) -> PendingResponse {
        self.enqueue(HttpMethod::Delete, path, Vec::new(), None)
    }

    /// Number of entries waiting for dispatch.
    pub fn queue_len(&self) -> usize {
        self.shared.lock_state().entries.len()
    }

    /// Number of dispatched entries that have not settled yet.
    pub fn in_flight(&self) -> usize {
        self.shared.lock_state().in_flight
    }

    /// Limits this scheduler was created with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.shared.config
    }
}

impl std::fmt::Debug for RequestScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestScheduler")
            .field("config", &self.shared.config)
            .field("queue_len", &self.queue_len())
            .field("in_flight", &self.in_flight())
            .field("has_credential", &self.has_credential())
            .finish()
    }
}

impl SchedulerShared {
    fn lock_state(&self) -> MutexGuard<'_, QueueState> {
        self.state
            .lock()
            .expect("scheduler queue lock is not poisoned")
    }

    fn current_credential(&self) -> Option<String> {
        self.credential
            .read()
            .expect("scheduler credential lock is not poisoned")
            .clone()
    }

    fn has_dispatchable(&self) -> bool {
        let state = self.lock_state();
        state.in_flight < self.config.max_in_flight && !state.entries.is_empty()
    }

    /// Dispatches queued entries until the queue is empty or the cap is reached.
    async fn pump(self: &Arc<Self>) {
        loop {
            if let Some(limiter) = &self.limiter {
                if !self.has_dispatchable() {
                    return;
                }
                limiter.until_ready().await;
            }

            let credential = self.current_credential();

            let entry = {
                let mut state = self.lock_state();
                if state.in_flight >= self.config.max_in_flight {
                    return;
                }
                let Some(entry) = state.entries.pop_front() else {
                    return;
                };
                if credential.is_some() {
                    state.in_flight += 1;
                }
                entry
            };

            let Some(credential) = credential else {
                warn!(method = %entry.method, path = %entry.path, "dispatch without api key");
                let error = ApiError::missing_credential().with_path(entry.path.clone());
                entry.settle(Err(error));
                continue;
            };

            debug!(
                method = %entry.method,
                path = %entry.path,
                waited_ms = entry.enqueued_at.elapsed().as_millis() as u64,
                "dispatching request"
            );

            let slot = InFlightSlot {
                shared: Arc::clone(self),
            };
            tokio::spawn(async move {
                let outcome = slot.shared.execute(&entry, &credential).await;
                entry.settle(outcome);
                drop(slot);
            });
        }
    }

    async fn execute(&self, entry: &QueueEntry, credential: &str) -> Outcome {
        let timeout_ms = u64::try_from(self.config.request_timeout.as_millis()).unwrap_or(u64::MAX);
        let mut request = HttpRequest::new(entry.method, join_url(&self.config.base_url, &entry.path))
            .with_header("content-type", "application/json")
            .with_timeout_ms(timeout_ms);
        request.query = entry
            .query
            .iter()
            .filter(|(name, _)| name != CREDENTIAL_PARAM)
            .cloned()
            .collect();
        request = request.with_query(CREDENTIAL_PARAM, credential);
        if let Some(body) = &entry.body {
            request = request.with_body(body.clone());
        }

        let started = Instant::now();
        let result = self.transport.execute(request).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.is_success() => {
                debug!(path = %entry.path, status = response.status, latency_ms, "request settled");
                Ok(response)
            }
            Ok(response) => {
                let error = normalize_response(&response, &entry.path);
                warn!(
                    path = %entry.path,
                    status = response.status,
                    kind = %error.kind(),
                    retry_after_ms = error.retry_after_ms(),
                    latency_ms,
                    "upstream rejected request"
                );
                Err(error)
            }
            Err(transport_error) => {
                let error = normalize_transport_error(&transport_error, &entry.path);
                warn!(
                    path = %entry.path,
                    kind = %error.kind(),
                    error = %transport_error,
                    latency_ms,
                    "transport failure"
                );
                Err(error)
            }
        }
    }
}

/// Releases one in-flight slot and wakes the loop, even if the call panicked.
struct InFlightSlot {
    shared: Arc<SchedulerShared>,
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock_state();
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.shared.wake.notify_one();
    }
}

async fn dispatch_loop(shared: Weak<SchedulerShared>, wake: Arc<Notify>, tick: Duration) {
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = wake.notified() => {}
            _ = ticker.tick() => {}
        }

        let Some(shared) = shared.upgrade() else {
            debug!("request scheduler dropped, stopping dispatch loop");
            return;
        };
        shared.pump().await;
    }
}

/// Future settled by the dispatch loop with the upstream response or an [`ApiError`].
#[must_use = "a pending response does nothing unless awaited"]
#[derive(Debug)]
pub struct PendingResponse {
    receiver: oneshot::Receiver<Outcome>,
}

impl PendingResponse {
    fn rejected(error: ApiError) -> Self {
        let (respond, receiver) = oneshot::channel();
        let _ = respond.send(Err(error));
        Self { receiver }
    }
}

impl Future for PendingResponse {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|settled| settled.unwrap_or_else(|_| Err(ApiError::closed())))
    }
}

fn owned_query(query: &[(&str, &str)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
