use bhapi_core::{ApiError, ApiErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] bhapi_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Config(#[from] bhapi_core::ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Config(_) => 2,
            Self::Api(error) => match error.kind() {
                ApiErrorKind::ConfigurationError => 2,
                ApiErrorKind::NotFound => 3,
                ApiErrorKind::RateLimited | ApiErrorKind::Backpressure => 5,
                ApiErrorKind::UpstreamError
                | ApiErrorKind::InvalidResponse
                | ApiErrorKind::Closed => 6,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_distinct_exit_codes() {
        assert_eq!(CliError::from(ApiError::not_found("gone")).exit_code(), 3);
        assert_eq!(CliError::from(ApiError::rate_limited(1_000)).exit_code(), 5);
        assert_eq!(CliError::from(ApiError::upstream(Some(500), "boom")).exit_code(), 6);
        assert_eq!(
            CliError::from(bhapi_core::ConfigError::MissingApiKey).exit_code(),
            2
        );
    }
}
