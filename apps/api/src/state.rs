use std::sync::Arc;

use crate::config::Config;
use crate::engine::AnalysisEngine;
use crate::profile::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Runtime settings, kept for handlers that need them.
    #[allow(dead_code)]
    pub config: Config,
    /// Pluggable interpretation strategy. Chosen once at startup via
    /// `ANALYSIS_ENGINE`; rule table or Gemini-backed.
    pub engine: Arc<dyn AnalysisEngine>,
    pub profiles: ProfileStore,
}
