//! Claim Fraud Scoring - API Server Binary
//!
//! This binary loads the model artifacts, verifies them against a sample
//! claim and starts the HTTP scoring API.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (artifacts under ./models)
//! cargo run --bin fraud-scoring-api
//!
//! # Run with environment variables
//! FRAUD_API_PORT=9000 FRAUD_API_SCORING__ARTIFACT_DIR=/srv/models cargo run --bin fraud-scoring-api
//! ```
//!
//! # Environment Variables
//!
//! * `FRAUD_API_HOST` - Server host (default: 0.0.0.0)
//! * `FRAUD_API_PORT` - Server port (default: 8080)
//! * `FRAUD_API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `FRAUD_API_MAX_BATCH_SIZE` - Largest accepted batch (default: 500)
//! * `FRAUD_API_SCORING__ARTIFACT_DIR` - Artifact directory (default: models)
//! * `FRAUD_API_SCORING__MODELS` - Comma-separated models to load (default: rfc,gbc,lr)
//! * `FRAUD_API_SCORING__PRIMARY_MODEL` - Model for single-claim scoring (default: rfc)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use domain_scoring::FraudScorer;
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration and artifacts, runs the smoke
/// check and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Any artifact is missing or corrupt
/// - A model fails to score the sample claim
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Invalid configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        artifact_dir = %config.scoring.artifact_dir().display(),
        "Starting Claim Fraud Scoring API Server"
    );

    let scorer = FraudScorer::load(&config.scoring).context("Failed to load model artifacts")?;
    scorer.smoke_check().context("Smoke check failed")?;

    let app = create_router(Arc::new(scorer), config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
