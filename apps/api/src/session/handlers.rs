use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::conversation::ConversationTurn;
use crate::session::registry::SessionContext;
use crate::session::{ConversationStatus, SessionStore};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub conversation_id: Uuid,
    pub status: ConversationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub turns: Vec<ConversationTurn>,
}

/// POST /api/v1/sessions
///
/// Opens a session and starts its provider conversation up front. If the
/// provider refuses, nothing is registered and the error is returned.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let mut store = SessionStore::new();
    let conversation = store.get_or_create_session(state.provider.as_ref()).await?;

    let context = SessionContext::new(store);
    let created_at = context.created_at;
    let status = context.store.status();
    let session_id = state.sessions.insert(context).await;
    info!(
        "Session {session_id} opened with conversation {}",
        conversation.id()
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            conversation_id: conversation.id(),
            status,
            created_at,
        }),
    ))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(session_id).await {
        info!("Session {session_id} closed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

/// GET /api/v1/sessions/:id/transcript
pub async fn handle_get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut ctx = session.lock().await;
    ctx.touch();
    Ok(Json(TranscriptResponse {
        session_id,
        turns: ctx.transcript.turns().to_vec(),
    }))
}
