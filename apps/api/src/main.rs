mod chat;
mod config;
mod errors;
mod guidance;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::guidance::trend::RandomTrendSource;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing GOOGLE_API_KEY stops startup here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Guide API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize provider client
    let gemini = GeminiClient::new(
        config.google_api_key.clone(),
        &config.gemini_model,
        &config.gemini_api_base,
        config.provider_timeout,
    )?;
    info!(
        "Gemini client initialized (model: {}, timeout: {}s)",
        gemini.model(),
        config.provider_timeout.as_secs()
    );

    let sessions = Arc::new(SessionRegistry::new(config.session_ttl));
    spawn_idle_sweeper(sessions.clone());

    let state = AppState {
        config: config.clone(),
        provider: Arc::new(gemini),
        trends: Arc::new(RandomTrendSource),
        sessions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops sessions whose clients went away without deleting them.
fn spawn_idle_sweeper(sessions: Arc<SessionRegistry>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.purge_idle().await;
        }
    });
}
