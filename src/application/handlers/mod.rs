//! Application handlers.
//!
//! Per-request orchestration between the HTTP layer and the service ports.

pub mod chat;

pub use chat::{
    merge_search_results, RelayMessageHandler, RelayReply, DIALOG_PENDING_TEXT, PROPOSITION_COUNT,
    SEARCH_FAILED_TEXT, SEARCH_PENDING_TEXT, SETUP_FAILED_PREFIX,
};
