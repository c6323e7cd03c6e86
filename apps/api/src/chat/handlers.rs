use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::bridge;
use crate::errors::AppError;
use crate::models::conversation::ConversationTurn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub turns: Vec<ConversationTurn>,
}

/// POST /api/v1/sessions/:id/chat
///
/// Forwards the message to the session's conversation. On success the
/// exchange is appended to the transcript; on failure the transcript is left
/// exactly as it was and a TRANSPORT_ERROR is returned.
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let session = state.sessions.get(session_id).await?;
    let mut ctx = session.lock().await;
    ctx.touch();

    let conversation = ctx
        .store
        .get_or_create_session(state.provider.as_ref())
        .await?;
    let reply = bridge::send(&conversation, &request.message).await?;

    ctx.transcript.record_exchange(&request.message, &reply.text);

    Ok(Json(ChatResponse {
        reply: reply.text,
        turns: ctx.transcript.turns().to_vec(),
    }))
}
