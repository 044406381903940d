//! HTTP handlers for the chat endpoint.
//!
//! The request and response bodies are the domain pass-through types
//! themselves - the relay forwards opaque service data, so there is nothing
//! to translate at this layer beyond status-code mapping.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::chat::{RelayMessageHandler, RelayReply};
use crate::domain::ChatTurn;

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub relay: Arc<RelayMessageHandler>,
}

impl ChatAppState {
    /// Creates a new ChatAppState.
    pub fn new(relay: Arc<RelayMessageHandler>) -> Self {
        Self { relay }
    }
}

/// POST /api/message - relay one chat turn.
///
/// The body is `{ input?: object, context?: object }`; a missing or empty
/// body is treated as an empty turn. Placeholder and merged responses reply
/// 200; a dialog-service failure is relayed with its original status and
/// body.
pub async fn post_message(
    State(state): State<ChatAppState>,
    turn: Option<Json<ChatTurn>>,
) -> Response {
    let turn = turn.map(|Json(turn)| turn).unwrap_or_default();

    match state.relay.handle(turn).await {
        RelayReply::Dialog(response) | RelayReply::Notice(response) => {
            (StatusCode::OK, Json(response)).into_response()
        }
        RelayReply::Upstream { status, body } => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(body)).into_response()
        }
    }
}
