//! LLM Client: the single point of entry for all generative-language calls.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! Chat handlers reach the provider only through `ChatProvider` / `ChatSession`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod gemini;
#[cfg(test)]
pub mod testing;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response blocked by provider: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A provider reply, passed through to the caller untouched.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderReply {
    pub text: String,
}

/// Starts conversations with the hosted model.
/// Carried in `AppState` as `Arc<dyn ChatProvider>`.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn start_chat(&self) -> Result<Arc<dyn ChatSession>, ProviderError>;
}

/// One ongoing conversation. Implementations keep whatever history the
/// provider needs and leave it untouched when a send fails.
#[async_trait]
pub trait ChatSession: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<ProviderReply, ProviderError>;
}
