//! Chat relay handlers.

pub mod merge_search;
pub mod relay_message;

pub use merge_search::{
    merge_search_results, PROPOSITION_COUNT, SEARCH_FAILED_TEXT, SEARCH_PENDING_TEXT,
};
pub use relay_message::{
    RelayMessageHandler, RelayReply, DIALOG_PENDING_TEXT, SETUP_FAILED_PREFIX,
};
