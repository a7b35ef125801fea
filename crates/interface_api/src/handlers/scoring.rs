//! Claim scoring handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use core_kernel::ClaimRecord;
use domain_scoring::EnsembleOutcome;

use crate::dto::scoring::*;
use crate::{error::ApiError, AppState};

/// Scores one claim
///
/// Uses the primary model and the default threshold profile unless
/// `?model=` names a model, in which case that model's own thresholds
/// apply. `?debug=true` attaches the final feature row.
pub async fn score_claim(
    State(state): State<AppState>,
    query: Result<Query<ScoreQuery>, QueryRejection>,
    payload: Result<Json<ClaimRecord>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Query(query) = query?;
    let Json(claim) = payload?;

    let result = match query.model {
        Some(kind) => state.scorer.score_with(kind, &claim)?,
        None => state.scorer.score(&claim)?,
    };
    let features = if query.debug {
        Some(state.scorer.inspect(query.model, &claim)?)
    } else {
        None
    };

    Ok(Json(ScoreResponse { result, features }))
}

/// Scores one claim with every model and returns the highest-risk result
pub async fn score_ensemble(
    State(state): State<AppState>,
    payload: Result<Json<ClaimRecord>, JsonRejection>,
) -> Result<Json<EnsembleOutcome>, ApiError> {
    let Json(claim) = payload?;
    Ok(Json(state.scorer.score_ensemble(&claim)?))
}

/// Scores a batch of claims; any prediction failure fails the request
pub async fn score_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchScoreRequest>, JsonRejection>,
) -> Result<Json<BatchScoreResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let limit = state.config.max_batch_size;
    if request.claims.len() > limit {
        return Err(ApiError::Validation(format!(
            "batch of {} claims exceeds the limit of {limit}",
            request.claims.len()
        )));
    }

    let batch_id = Uuid::now_v7();
    let mode = request.mode;
    let scorer = state.scorer.clone();
    let results = tokio::task::spawn_blocking(move || scorer.score_batch(&request.claims, mode))
        .await
        .map_err(|e| ApiError::Internal(format!("Batch scoring task failed: {e}")))??;

    info!(batch_id = %batch_id, mode = %mode, count = results.len(), "Batch scored");

    Ok(Json(BatchScoreResponse {
        batch_id,
        mode,
        count: results.len(),
        results,
        scored_at: Utc::now(),
    }))
}
