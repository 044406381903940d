//! Merge Step - folds top search passages into a dialog response.
//!
//! A dialog response whose context carries a set `action` flag is asking for
//! a document lookup on the latest user input. The lookup's top passages are
//! appended to the response text as numbered proposition lines; the flag is
//! cleared afterwards so a later merge of the same response is a no-op. A
//! failed or not-yet-possible lookup degrades to a single apology line - the
//! turn itself still succeeds.

use tracing::{debug, error};

use crate::domain::{DialogResponse, QueryDefaults};
use crate::ports::SearchService;

/// How many passages are folded into the response text.
pub const PROPOSITION_COUNT: usize = 3;

/// Appended when the search service has not finished setup.
pub const SEARCH_PENDING_TEXT: &str =
    "Sorry, currently I do not have a response. Discovery initialization is in progress. Please try again later.";

/// Appended when the search query fails.
pub const SEARCH_FAILED_TEXT: &str = "Problems ....";

/// Runs the conditional lookup and returns the (possibly extended) response.
///
/// `defaults` is the search readiness handle; `None` means the service is
/// still pending. Responses without a set action flag pass through untouched.
pub async fn merge_search_results(
    search: &dyn SearchService,
    defaults: Option<&QueryDefaults>,
    mut response: DialogResponse,
) -> DialogResponse {
    if !response.action_requested() {
        return response;
    }

    let Some(defaults) = defaults else {
        debug!("discovery is not ready for query");
        response.push_line(SEARCH_PENDING_TEXT);
        response.clear_action();
        return response;
    };

    let query_text = response.input_text().to_owned();
    debug!(query = %query_text, "running document lookup");

    match search.query(defaults, &query_text).await {
        Err(err) => {
            error!(error = %err, "error searching for documents");
            response.push_line(SEARCH_FAILED_TEXT);
        }
        Ok(result) => {
            // The service ranks passages; clamp to what it actually returned.
            for (rank, passage) in result.passages.iter().take(PROPOSITION_COUNT).enumerate() {
                debug!(score = passage.passage_score, "passage selected");
                response.push_line(format!("proposition{}: {}", rank + 1, passage.passage_text));
                response.push_line("");
            }
        }
    }

    response.clear_action();
    response
}
