//! # bhapi Core
//!
//! Client core for the Brawlhalla statistics API.
//!
//! ## Overview
//!
//! - **Request scheduler**: bounded FIFO queue with a global in-flight cap,
//!   fail-fast backpressure and one normalized error taxonomy
//! - **Rating engine**: best rating, glory and season rating reset
//! - **Typed endpoints**: players, ranked seasons, clans, legends, rankings
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Typed endpoint client |
//! | [`config`] | Scheduler limits and environment loading |
//! | [`domain`] | Upstream payload types |
//! | [`error`] | Error taxonomy and transport normalization |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`rating`] | Glory and rating-reset formulas |
//! | [`scheduler`] | Rate-limited dispatch queue |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ BrawlhallaClient │
//! └────────┬─────────┘
//!          │ enqueue
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ RequestScheduler │────▶│ HttpClient       │
//! │ (queue + cap)    │     │ (reqwest/noop)   │
//! └────────┬─────────┘     └──────────────────┘
//!          │ settle
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ Domain payloads  │────▶│ Rating engine    │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every failed request settles with an [`ApiError`]:
//!
//! ```rust
//! use bhapi_core::{ApiError, ApiErrorKind};
//!
//! fn handle_error(error: ApiError) {
//!     match error.kind() {
//!         ApiErrorKind::RateLimited => {
//!             let _wait_ms = error.retry_after_ms();
//!         }
//!         ApiErrorKind::Backpressure => {
//!             // queue is full, shed load
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is sent as the `api_key` query parameter and never logged
//! - Transport errors are stripped of the request URL

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod rating;
pub mod scheduler;

pub use api::BrawlhallaClient;

pub use config::{api_key_from_env, SchedulerConfig, API_KEY_ENV, DEFAULT_BASE_URL};

pub use domain::{
    Clan, ClanMember, ClanRank, LegendDetails, LegendRanked, LegendStats, LegendSummary,
    PlayerClan, PlayerRanked, PlayerStats, Ranking1v1, Ranking2v2, RankingKind, RankingSeasonal,
    RankedRegion, RankedTier, TeamRanked,
};

pub use error::{ApiError, ApiErrorKind, ConfigError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use rating::{Glory, GloryData};

pub use scheduler::{PendingResponse, RequestScheduler};
