//! Error types for item-pager operations.
//!
//! Every failure while walking pages, decoding responses, or reading and
//! writing snapshots is reported through [`FetchError`]. Configuration
//! problems have their own [`ConfigError`](crate::config::ConfigError) which
//! converts into `FetchError` when it surfaces from a fetch.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while fetching or loading items.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success HTTP status.
    #[error("API returned status {status}: {body}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, if one could be read.
        body: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The response decoded but its contents are inconsistent.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::HttpStatus {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API returned status 503: maintenance");

        let err = FetchError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "HTTP request failed: connection refused");

        let err = FetchError::InvalidResponse("page 2 reported status 'error'".to_string());
        assert!(err.to_string().starts_with("Invalid response"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: FetchError = ConfigError::ValidationFailed("per_page must be > 0".into()).into();
        assert!(matches!(err, FetchError::Config(_)));
        assert!(err.to_string().contains("per_page must be > 0"));
    }
}
