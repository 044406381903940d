//! Domain types for the chat relay.
//!
//! These are the wire-shaped values that flow between the browser client, the
//! dialog assistant, and the document search service. The relay treats most of
//! their content as opaque; unknown fields are preserved across the round trip.

pub mod message;
pub mod search;

pub use message::{ChatTurn, DialogOutput, DialogResponse, MessageRequest, WorkspaceId};
pub use search::{Passage, QueryDefaults, QueryResult};
