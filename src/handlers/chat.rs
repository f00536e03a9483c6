use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::conversation::{self, ChatOutcome};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Omitted or null mints a new session.
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub message: String,
}

pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>, AppError> {
    // An empty first message opens the conversation with a greeting; on an
    // existing session it is a client bug.
    if payload.message.trim().is_empty() && payload.session_id.is_some() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let outcome = conversation::process_message(&state, payload.session_id, &payload.message)?;
    Ok(Json(outcome))
}

pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> StatusCode {
    conversation::reset_session(&state, session_id);
    StatusCode::NO_CONTENT
}
