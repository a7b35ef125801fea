//! Scoring DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ClaimRecord;
use domain_scoring::{FeatureInspection, ModelDescriptor, ModelKind, ScoreResult, ScoringMode, ThresholdPair};

#[derive(Debug, Default, Deserialize)]
pub struct ScoreQuery {
    /// Score with one named model and its own thresholds
    pub model: Option<ModelKind>,
    /// Attach the final feature row to the response
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureInspection>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchScoreRequest {
    #[validate(length(min = 1, message = "at least one claim is required"))]
    pub claims: Vec<ClaimRecord>,
    #[serde(default)]
    pub mode: ScoringMode,
}

#[derive(Debug, Serialize)]
pub struct BatchScoreResponse {
    pub batch_id: Uuid,
    pub mode: ScoringMode,
    pub count: usize,
    pub results: Vec<ScoreResult>,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub primary: ModelKind,
    pub default_thresholds: ThresholdPair,
    pub global_threshold: Option<f64>,
    pub models: Vec<ModelDescriptor>,
}
