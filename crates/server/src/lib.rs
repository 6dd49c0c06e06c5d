//! # exovet-server
//!
//! Inference form and JSON API for the exoplanet classifier. The model
//! artifact is loaded on the first request that needs it and shared by all
//! later requests.

pub mod config;
pub mod error;
pub mod model;
pub mod page;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use model::{predict_observation, ModelHandle, PredictionView};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelHandle>,
}

impl AppState {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

/// Build the router with middleware.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Form page
        .route("/", get(routes::index))
        .route("/predict", post(routes::predict_form))
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        // API endpoints
        .route("/api/v1/presets", get(routes::presets))
        .route("/api/v1/predict", post(routes::predict_api))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
