//! Shared error type for the external service ports.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the dialog and search service clients.
///
/// Dialog-call failures propagate to the HTTP client with the upstream status
/// and body, so `Api` keeps both verbatim. Transport and decoding failures
/// have no upstream status and default to 500.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Upstream replied with a non-success status.
    #[error("service returned status {status}")]
    Api {
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body, preserved verbatim.
        body: Value,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to decode the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Setup could not resolve or provision a required resource.
    #[error("setup failed: {0}")]
    Setup(String),
}

impl ServiceError {
    /// Creates an upstream API error.
    pub fn api(status: u16, body: Value) -> Self {
        Self::Api { status, body }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a setup error.
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup(message.into())
    }

    /// The HTTP status to relay to the client (default 500).
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            _ => 500,
        }
    }

    /// The body to relay to the client.
    ///
    /// Upstream bodies pass through verbatim; local failures are wrapped in
    /// an error object of the same general shape.
    pub fn body(&self) -> Value {
        match self {
            Self::Api { body, .. } => body.clone(),
            other => serde_json::json!({ "code": other.status_code(), "error": other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_keeps_status_and_body() {
        let err = ServiceError::api(429, json!({ "error": "rate limited" }));
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.body(), json!({ "error": "rate limited" }));
    }

    #[test]
    fn non_api_errors_default_to_500() {
        let err = ServiceError::network("connection refused");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.body()["code"], 500);

        let err = ServiceError::parse("unexpected token");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn errors_display_their_detail() {
        let err = ServiceError::api(503, json!({}));
        assert_eq!(err.to_string(), "service returned status 503");

        let err = ServiceError::setup("collection not found");
        assert_eq!(err.to_string(), "setup failed: collection not found");
    }
}
