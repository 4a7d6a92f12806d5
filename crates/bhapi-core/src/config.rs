//! Scheduler configuration and environment loading.

use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::ConfigError;

/// Upstream base endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.brawlhalla.com/";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BRAWLHALLA_API_KEY";

const MAX_IN_FLIGHT_ENV: &str = "BHAPI_MAX_IN_FLIGHT";
const MAX_QUEUE_LENGTH_ENV: &str = "BHAPI_MAX_QUEUE_LENGTH";
const DISPATCH_TICK_ENV: &str = "BHAPI_DISPATCH_TICK_MS";
const TIMEOUT_ENV: &str = "BHAPI_TIMEOUT_MS";
const RATE_LIMIT_ENV: &str = "BHAPI_RATE_LIMIT_PER_SECOND";
const BASE_URL_ENV: &str = "BHAPI_BASE_URL";

/// Limits and timers for a [`RequestScheduler`](crate::RequestScheduler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Base URL every request path is appended to. Default: `https://api.brawlhalla.com/`.
    pub base_url: String,
    /// Maximum number of dispatched, unsettled requests. Default: 10.
    pub max_in_flight: usize,
    /// Maximum number of queued, undispatched requests. Default: 500.
    pub max_queue_length: usize,
    /// Safety-net wake-up for the dispatch loop. Default: 100ms.
    pub dispatch_tick_interval: Duration,
    /// Per-call transport timeout. Default: 10s.
    pub request_timeout: Duration,
    /// Optional cap on dispatches started per second. Default: none.
    pub rate_limit_per_second: Option<NonZeroU32>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            max_in_flight: 10,
            max_queue_length: 500,
            dispatch_tick_interval: Duration::from_millis(100),
            request_timeout: Duration::from_secs(10),
            rate_limit_per_second: None,
        }
    }
}

impl SchedulerConfig {
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_max_queue_length(mut self, max_queue_length: usize) -> Self {
        self.max_queue_length = max_queue_length;
        self
    }

    pub fn with_dispatch_tick_interval(mut self, interval: Duration) -> Self {
        self.dispatch_tick_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_rate_limit_per_second(mut self, limit: NonZeroU32) -> Self {
        self.rate_limit_per_second = Some(limit);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_in_flight == 0 {
            return Err(ConfigError::Zero {
                field: "max_in_flight",
            });
        }
        if self.max_queue_length == 0 {
            return Err(ConfigError::Zero {
                field: "max_queue_length",
            });
        }
        if self.dispatch_tick_interval.is_zero() {
            return Err(ConfigError::Zero {
                field: "dispatch_tick_interval",
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Zero {
                field: "request_timeout",
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.base_url.clone(),
            });
        }
        Ok(())
    }

    /// Builds a configuration from the defaults overridden by `BHAPI_*`
    /// environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BASE_URL_ENV) {
            config.base_url = value;
        }
        if let Some(value) = parse_var(&lookup, MAX_IN_FLIGHT_ENV)? {
            config.max_in_flight = to_usize(MAX_IN_FLIGHT_ENV, value)?;
        }
        if let Some(value) = parse_var(&lookup, MAX_QUEUE_LENGTH_ENV)? {
            config.max_queue_length = to_usize(MAX_QUEUE_LENGTH_ENV, value)?;
        }
        if let Some(value) = parse_var(&lookup, DISPATCH_TICK_ENV)? {
            config.dispatch_tick_interval = Duration::from_millis(value);
        }
        if let Some(value) = parse_var(&lookup, TIMEOUT_ENV)? {
            config.request_timeout = Duration::from_millis(value);
        }
        if let Some(value) = parse_var(&lookup, RATE_LIMIT_ENV)? {
            let value = u32::try_from(value).map_err(|_| ConfigError::InvalidNumber {
                name: RATE_LIMIT_ENV,
                value: value.to_string(),
            })?;
            config.rate_limit_per_second = NonZeroU32::new(value);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Reads the API key from `BRAWLHALLA_API_KEY`, ignoring blank values.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty())
}

fn to_usize(name: &'static str, value: u64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = SchedulerConfig::default();

        assert_eq!(config.max_in_flight, 10);
        assert_eq!(config.max_queue_length, 500);
        assert_eq!(config.dispatch_tick_interval, Duration::from_millis(100));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.rate_limit_per_second, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = SchedulerConfig::from_lookup(lookup(&[
            ("BHAPI_MAX_IN_FLIGHT", "4"),
            ("BHAPI_MAX_QUEUE_LENGTH", "20"),
            ("BHAPI_DISPATCH_TICK_MS", "50"),
            ("BHAPI_TIMEOUT_MS", "2500"),
            ("BHAPI_RATE_LIMIT_PER_SECOND", "10"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.max_in_flight, 4);
        assert_eq!(config.max_queue_length, 20);
        assert_eq!(config.dispatch_tick_interval, Duration::from_millis(50));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.rate_limit_per_second, NonZeroU32::new(10));
    }

    #[test]
    fn non_numeric_override_is_rejected() {
        let error = SchedulerConfig::from_lookup(lookup(&[("BHAPI_MAX_IN_FLIGHT", "ten")]))
            .expect_err("non-numeric value");

        assert_eq!(
            error,
            ConfigError::InvalidNumber {
                name: "BHAPI_MAX_IN_FLIGHT",
                value: String::from("ten"),
            }
        );
    }

    #[test]
    fn oversized_limit_is_rejected_instead_of_truncated() {
        assert_eq!(to_usize(MAX_IN_FLIGHT_ENV, 7), Ok(7));

        if usize::BITS < u64::BITS {
            let error = SchedulerConfig::from_lookup(lookup(&[(
                "BHAPI_MAX_QUEUE_LENGTH",
                "4294967296",
            )]))
            .expect_err("does not fit in usize");
            assert_eq!(
                error,
                ConfigError::InvalidNumber {
                    name: "BHAPI_MAX_QUEUE_LENGTH",
                    value: String::from("4294967296"),
                }
            );
        }
    }

    #[test]
    fn zero_limits_are_rejected() {
        let error = SchedulerConfig::default()
            .with_max_in_flight(0)
            .validate()
            .expect_err("zero in-flight cap");
        assert_eq!(
            error,
            ConfigError::Zero {
                field: "max_in_flight"
            }
        );

        let error = SchedulerConfig::from_lookup(lookup(&[("BHAPI_MAX_QUEUE_LENGTH", "0")]))
            .expect_err("zero queue length");
        assert_eq!(
            error,
            ConfigError::Zero {
                field: "max_queue_length"
            }
        );
    }

    #[test]
    fn base_url_must_be_http() {
        let error = SchedulerConfig::default()
            .with_base_url("ftp://api.brawlhalla.com/")
            .validate()
            .expect_err("ftp base url");
        assert!(matches!(error, ConfigError::InvalidBaseUrl { .. }));
    }
}
