//! HTTP API Layer
//!
//! This crate provides the REST API for the claim fraud scoring pipeline
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Health, model listing and scoring handlers
//! - **Middleware**: Tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let scorer = Arc::new(FraudScorer::load(&config.scoring)?);
//! let app = create_router(scorer, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_scoring::FraudScorer;

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{health, models, scoring};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<FraudScorer>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `scorer` - Scoring pipeline built from the loaded artifacts
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(scorer: Arc<FraudScorer>, config: ApiConfig) -> Router {
    let state = AppState { scorer, config };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Scoring routes
    let claims_routes = Router::new()
        .route("/score", post(scoring::score_claim))
        .route("/score/ensemble", post(scoring::score_ensemble))
        .route("/score/batch", post(scoring::score_batch));

    let api_routes = Router::new()
        .route("/models", get(models::list_models))
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
