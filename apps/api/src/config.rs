use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::session::registry::DEFAULT_SESSION_TTL_SECS;

const MISSING_API_KEY: &str =
    "Google API key not found. Please configure your environment variables.";

/// Application configuration loaded from environment variables.
/// Startup fails if the provider API key is missing.
#[derive(Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    /// Upper bound on a single provider round trip.
    pub provider_timeout: Duration,
    /// Sessions idle for longer than this are dropped.
    pub session_ttl: chrono::Duration,
    pub port: u16,
    pub rust_log: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("google_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("provider_timeout", &self.provider_timeout)
            .field("session_ttl", &self.session_ttl)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let google_api_key = match lookup("GOOGLE_API_KEY") {
            Some(key) if !key.is_empty() => key,
            _ => bail!(MISSING_API_KEY),
        };

        let provider_timeout_secs = lookup("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?;
        if provider_timeout_secs == 0 {
            bail!("PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        if session_ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }

        Ok(Config {
            google_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            session_ttl: chrono::Duration::seconds(i64::from(session_ttl_secs)),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config::from_lookup(|key| (key == "GOOGLE_API_KEY").then(|| "test-key".to_string()))
        .expect("test config")
}
