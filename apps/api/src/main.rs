mod config;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod recruiting;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::{AssessmentGateway, ScoringGateway};
use crate::llm_client::{GenerativeModel, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{AppStore, FileStore, KeyValueStore, MemoryStore};

/// `DATA_DIR` value that selects process-local storage.
const IN_MEMORY_DATA_DIR: &str = ":memory:";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
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

    info!("Starting SmartHire API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the key-value store and load both collections
    let persistence: Arc<dyn KeyValueStore> = if config.data_dir.as_os_str() == IN_MEMORY_DATA_DIR {
        info!("Using in-memory storage; records are lost on exit");
        Arc::new(MemoryStore::default())
    } else {
        let files = FileStore::open(&config.data_dir).with_context(|| {
            format!("Could not open data directory {}", config.data_dir.display())
        })?;
        info!("Data directory: {}", config.data_dir.display());
        Arc::new(files)
    };
    let store = AppStore::load(persistence, config.seed_demo_jobs);

    // Initialize LLM client
    let llm: Arc<dyn GenerativeModel> = Arc::new(
        LlmClient::new(config.gemini_api_key.clone(), config.llm_timeout)
            .context("Failed to build HTTP client")?,
    );
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );
    info!(
        "Assessment failure policy: {}",
        config.assessment_failure_policy
    );

    // Build app state
    let state = AppState {
        store,
        scorer: Arc::new(ScoringGateway::new(llm.clone())),
        assessor: Arc::new(AssessmentGateway::new(llm)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the candidate UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
