//! HTTP adapters - REST API exposed to the browser client.

pub mod chat;

pub use chat::{chat_router, ChatAppState};
