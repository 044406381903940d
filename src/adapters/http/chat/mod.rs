//! Chat endpoint - the one API route the browser client calls.

pub mod handlers;
pub mod routes;

pub use handlers::ChatAppState;
pub use routes::{chat_router, chat_routes};
