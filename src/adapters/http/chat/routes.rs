//! Axum routes for the chat endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{post_message, ChatAppState};

/// Creates routes for chat endpoints.
///
/// REST Endpoints:
/// - POST /api/message - relay one chat turn
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new().route("/message", post(post_message))
}

/// Combined router with all chat routes under /api.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new().nest("/api", chat_routes())
}
