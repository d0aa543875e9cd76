//! Error types for the SRMA client
//!
//! Provides a single error taxonomy for the whole client:
//! - Transport errors (network/connection failure)
//! - API errors (non-2xx responses with a normalized message)
//! - Contract errors (responses that fail to decode)
//! - Validation errors (caught before any network call)

use std::sync::Arc;
use thiserror::Error;

/// Result type alias using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Client error taxonomy
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or connection failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. The message prefers the server's structured
    /// `detail` field over generic transport text.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 404 split out of the API case so callers can branch on it.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Response failed to decode into the expected shape, including
    /// enumerated fields holding unrecognized values.
    #[error("contract violation: {message}")]
    Contract { message: String },

    /// Input rejected before any network call was issued.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Cache-internal failure (aborted in-flight fetch).
    #[error("cache error: {message}")]
    Cache { message: String },

    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Outcome of a deduplicated in-flight fetch, observed by every
    /// caller that resolved from the same underlying call.
    #[error("{0}")]
    Shared(Arc<ApiError>),
}

impl ApiError {
    pub fn contract(message: impl Into<String>) -> Self {
        ApiError::Contract {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    /// True when the underlying failure is a missing resource, looking
    /// through shared fetch outcomes.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound { .. } => true,
            ApiError::Shared(inner) => inner.is_not_found(),
            _ => false,
        }
    }

    /// True when the failure never reached the network.
    pub fn is_local(&self) -> bool {
        match self {
            ApiError::Validation { .. } | ApiError::Configuration(_) | ApiError::Cache { .. } => {
                true
            }
            ApiError::Shared(inner) => inner.is_local(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Contract {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation {
            message: err.to_string(),
            field: err.field_errors().keys().next().map(|f| f.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_through_shared() {
        let inner = Arc::new(ApiError::NotFound {
            message: "Review not found".into(),
        });
        let err = ApiError::Shared(inner);
        assert!(err.is_not_found());
        assert!(!err.is_local());
    }

    #[test]
    fn test_validation_is_local() {
        let err = ApiError::validation("title must not be empty", Some("title"));
        assert!(err.is_local());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_error_maps_to_contract() {
        let decode_err = serde_json::from_str::<u32>("\"oops\"").unwrap_err();
        let err = ApiError::from(decode_err);
        assert!(matches!(err, ApiError::Contract { .. }));
    }
}
