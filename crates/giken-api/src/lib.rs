//! Giken API crate - axum HTTP server for the chat room.
//!
//! Serves the server-rendered chat page on `/` plus JSON health and
//! transcript endpoints. Form submissions run through [`ChatRoom`], which
//! sanitizes input, asks the NPC for a reply and appends both to the
//! transcript.

pub mod error;
pub mod handlers;
pub mod render;
pub mod room;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use room::{ChatForm, ChatRoom, PageView};
pub use routes::{create_router, start_server};
pub use state::AppState;
