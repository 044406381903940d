//! Message Relay - forwards one chat turn through the dialog service and the
//! conditional search merge.
//!
//! The relay is stateless per request. Its guards run in a fixed order: a
//! recorded setup failure wins over everything, then a still-pending dialog
//! workspace, then the actual forward. Placeholder replies are HTTP 200 with
//! a chat-shaped body; only a dialog-service failure changes the status code,
//! and that failure is relayed verbatim.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::readiness::Readiness;
use crate::domain::{ChatTurn, DialogResponse, MessageRequest};
use crate::ports::{DialogService, SearchService};

use super::merge_search::merge_search_results;

/// Prefix of the reply sent after a setup failure; the accumulated error
/// text is appended.
pub const SETUP_FAILED_PREFIX: &str =
    "The app failed to initialize properly. Setup and restart needed.";

/// Reply sent while the dialog workspace is still being set up.
pub const DIALOG_PENDING_TEXT: &str = "Assistant initialization in progress. Please try again.";

/// Outcome of relaying one chat turn.
#[derive(Debug)]
pub enum RelayReply {
    /// Dialog response, merge step applied. Replied with HTTP 200.
    Dialog(DialogResponse),
    /// Server-generated placeholder. Also HTTP 200; the condition is
    /// communicated in the payload, not the status code.
    Notice(DialogResponse),
    /// Dialog service failure, propagated with its original status and body.
    Upstream { status: u16, body: Value },
}

/// Handler for relaying chat turns.
pub struct RelayMessageHandler {
    dialog: Arc<dyn DialogService>,
    search: Arc<dyn SearchService>,
    readiness: Arc<Readiness>,
}

impl RelayMessageHandler {
    pub fn new(
        dialog: Arc<dyn DialogService>,
        search: Arc<dyn SearchService>,
        readiness: Arc<Readiness>,
    ) -> Self {
        Self {
            dialog,
            search,
            readiness,
        }
    }

    /// Relays one chat turn.
    pub async fn handle(&self, turn: ChatTurn) -> RelayReply {
        if let Some(error) = self.readiness.setup_error() {
            return RelayReply::Notice(DialogResponse::notice(format!(
                "{SETUP_FAILED_PREFIX}{error}"
            )));
        }

        let Some(workspace_id) = self.readiness.workspace() else {
            return RelayReply::Notice(DialogResponse::notice(DIALOG_PENDING_TEXT));
        };

        let request = MessageRequest::from_turn(workspace_id.clone(), turn);
        match self.dialog.message(&request).await {
            Err(err) => RelayReply::Upstream {
                status: err.status_code(),
                body: err.body(),
            },
            Ok(response) => {
                debug!(lines = response.output.text.len(), "dialog response received");
                let merged = merge_search_results(
                    self.search.as_ref(),
                    self.readiness.search_defaults(),
                    response,
                )
                .await;
                RelayReply::Dialog(merged)
            }
        }
    }
}
