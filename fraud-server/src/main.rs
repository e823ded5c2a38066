//! Fraud Scoring Server
//!
//! Loads the model artifact once, then serves `POST /predict` until
//! stopped. A missing or invalid artifact leaves the service running on
//! the amount heuristic.

use anyhow::Context;
use fraud_core::Scorer;
use fraud_server::{create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraud_server=debug,fraud_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Fraud Scoring Server v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.environment);

    tracing::info!("Loading model from {}", config.model_path.display());
    let scorer = Scorer::from_artifact_path(&config.model_path);
    tracing::info!("Scoring mode: {:?}", scorer.mode());

    // Build application state
    let state = AppState::new(scorer, config.clone());

    // Build router
    let app = create_router(state)?;

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
