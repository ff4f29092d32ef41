mod catalog;
mod config;
mod engine;
mod errors;
mod llm_client;
mod models;
mod profile;
mod routes;
mod saju;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::engine::llm::LlmEngine;
use crate::engine::rules::RuleEngine;
use crate::engine::{AnalysisEngine, EngineKind};
use crate::profile::ProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    errors::set_development(config.is_development());

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("saju_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Saju API v{}", env!("CARGO_PKG_VERSION"));

    // Select the interpretation engine (swap via ANALYSIS_ENGINE)
    let engine: Arc<dyn AnalysisEngine> = match config.engine {
        EngineKind::Rules => Arc::new(RuleEngine),
        EngineKind::Llm => Arc::new(LlmEngine::new(config.gemini_api_key.clone())),
    };
    info!(
        "Analysis engine initialized: {} (model: {}, key configured: {})",
        config.engine.as_str(),
        llm_client::MODEL,
        config.gemini_api_key.is_some()
    );

    let profiles = ProfileStore::new(&config.profile_path);
    info!("Profile store at {}", config.profile_path);

    let state = AppState {
        config: config.clone(),
        engine,
        profiles,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
