use anyhow::{Context, Result};

use crate::engine::EngineKind;

/// Application configuration loaded from environment variables.
/// Nothing here is strictly required: a missing `GEMINI_API_KEY` selects the
/// mock fallback path rather than failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub engine: EngineKind,
    pub profile_path: String,
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let gemini_api_key = optional_env("GEMINI_API_KEY");

        let engine = match optional_env("ANALYSIS_ENGINE") {
            Some(raw) => EngineKind::parse(&raw)
                .with_context(|| format!("ANALYSIS_ENGINE must be 'rules' or 'llm', got '{raw}'"))?,
            None => EngineKind::default(),
        };

        Ok(Config {
            gemini_api_key,
            engine,
            profile_path: std::env::var("PROFILE_PATH")
                .unwrap_or_else(|_| "./data/profile.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
        })
    }

    /// Error responses attach detail messages only in development.
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

/// Empty variables count as unset, so `GEMINI_API_KEY=` behaves like no key.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
