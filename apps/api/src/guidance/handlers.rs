//! Axum route handlers for the career form.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::guidance::form::{career_form, FormDescriptor};
use crate::guidance::render::render_submission;
use crate::guidance::submission::{evaluate_submission, SubmissionOutcome};
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitProfileResponse {
    pub profile: Profile,
    #[serde(flatten)]
    pub outcome: SubmissionOutcome,
    /// The whole submission rendered for display.
    pub markdown: String,
}

/// GET /api/v1/form
pub async fn handle_get_form() -> Json<FormDescriptor> {
    Json(career_form())
}

/// POST /api/v1/sessions/:id/profile
///
/// Stores the submission (even an incomplete one) and returns either a
/// recommendation or the guidance message.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(profile): Json<Profile>,
) -> Result<Json<SubmitProfileResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut ctx = session.lock().await;
    ctx.touch();

    ctx.store.set_profile(profile.clone());
    let outcome = evaluate_submission(&profile, state.trends.as_ref());
    let markdown = render_submission(&profile, &outcome);

    if let Some(rec) = outcome.recommendation() {
        info!("Session {session_id}: profile classified as {:?}", rec.bucket);
    } else {
        info!("Session {session_id}: incomplete profile submitted");
    }

    Ok(Json(SubmitProfileResponse {
        profile,
        outcome,
        markdown,
    }))
}

/// GET /api/v1/sessions/:id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut ctx = session.lock().await;
    ctx.touch();
    ctx.store
        .profile()
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No profile submitted for session {session_id}")))
}
