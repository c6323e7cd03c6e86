use std::sync::Arc;

use crate::config::Config;
use crate::guidance::trend::TrendSource;
use crate::llm_client::ChatProvider;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Starts one provider conversation per session. Default: `GeminiClient`.
    pub provider: Arc<dyn ChatProvider>,
    /// Market-trend draws for recommendations. Default: `RandomTrendSource`.
    pub trends: Arc<dyn TrendSource>,
    pub sessions: Arc<SessionRegistry>,
}
