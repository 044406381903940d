//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay to external systems:
//! - `assistant` - dialog service client
//! - `discovery` - document search service client
//! - `http` - REST API exposed to the browser client

pub mod assistant;
pub mod discovery;
pub mod http;

pub use assistant::AssistantClient;
pub use discovery::DiscoveryClient;

use crate::ports::ServiceError;

/// Maps a non-success upstream reply onto [`ServiceError::Api`].
///
/// The upstream JSON body is preserved verbatim; non-JSON bodies are wrapped
/// so the client still receives an error object.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ServiceError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str(&text)
        .unwrap_or_else(|_| serde_json::json!({ "code": status, "error": text }));
    ServiceError::api(status, body)
}
