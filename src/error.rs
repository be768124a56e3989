//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Config Violations ==
/// A single rule broken by a cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigViolation {
    /// Capacity must be greater than zero
    #[error("cache capacity has to be > 0")]
    ZeroCapacity,

    /// A non-zero sweep interval is below the allowed minimum
    #[error(
        "sweep interval has to be 0 or >= {}s, got {}s",
        .minimum.as_secs(),
        .interval.as_secs()
    )]
    SweepIntervalTooShort { interval: Duration, minimum: Duration },

    /// An environment variable is set but its value does not parse
    #[error("{variable} has an invalid value {value:?}")]
    Unparsable {
        variable: &'static str,
        value: String,
    },
}

/// Every violation found while validating a cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cache configuration: {}", join_violations(.violations))]
pub struct ConfigError {
    pub violations: Vec<ConfigViolation>,
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent or expired
    #[error("Can't find any item with key {0}")]
    NotFound(String),

    /// Configuration rejected at construction
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// No engine exists for the requested cache type
    #[error("Cache type {0} not supported")]
    UnsupportedCacheType(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfig(_) | CacheError::UnsupportedCacheType(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
