//! Route handler functions.

use axum::extract::{Form, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use giken_core::ChatEntry;

use crate::error::ApiError;
use crate::render::render_page;
use crate::room::ChatForm;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub transcript_len: u64,
}

/// GET / (and any method other than POST) - render the chat page.
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let view = state.room.view()?;
    Ok(Html(render_page(state.room.config(), &view)))
}

/// POST / - submit a message and render the updated page.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Html<String>, ApiError> {
    let view = state.room.submit(&form)?;
    Ok(Html(render_page(state.room.config(), &view)))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let transcript_len = state.room.transcript()?.len() as u64;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        transcript_len,
    }))
}

/// GET /log - the current transcript as JSON.
pub async fn log(State(state): State<AppState>) -> Result<Json<Vec<ChatEntry>>, ApiError> {
    Ok(Json(state.room.transcript()?))
}
