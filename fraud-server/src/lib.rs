//! Fraud Scoring - Prediction Service
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  FRAUD SCORING API                   │
//! ├──────────────────────────────────────────────────────┤
//! │   POST /predict ──► CORS ──► Scorer (Arc, shared)    │
//! │                               │                      │
//! │                 balance rule ─┼─ model | heuristic   │
//! │   GET  /health  ──────────────┘                      │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use fraud_core::Scorer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<Scorer>,
    pub config: Config,
}

impl AppState {
    pub fn new(scorer: Scorer, config: Config) -> Self {
        Self {
            scorer: Arc::new(scorer),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> anyhow::Result<Router> {
    let origin: HeaderValue = state
        .config
        .cors_origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {}", state.config.cors_origin))?;

    // CORS applies to the scoring route only
    let predict_routes = Router::new()
        .route("/predict", post(handlers::predict::predict))
        .layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );

    let public_routes = Router::new().route("/health", get(handlers::health::check));

    Ok(Router::new()
        .merge(predict_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
