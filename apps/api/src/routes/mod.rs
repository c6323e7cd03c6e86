pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::guidance::handlers as guidance;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/form", get(guidance::handle_get_form))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:id", delete(session::handle_delete_session))
        .route(
            "/api/v1/sessions/:id/transcript",
            get(session::handle_get_transcript),
        )
        // Career form
        .route(
            "/api/v1/sessions/:id/profile",
            post(guidance::handle_submit_profile).get(guidance::handle_get_profile),
        )
        // Chat
        .route("/api/v1/sessions/:id/chat", post(chat::handle_chat))
        .with_state(state)
}
