//! Model listing handler

use axum::{extract::State, Json};

use crate::dto::scoring::ModelsResponse;
use crate::AppState;

/// Lists loaded models with their thresholds and expected features
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let scorer = &state.scorer;
    Json(ModelsResponse {
        primary: scorer.primary_model(),
        default_thresholds: scorer.default_profile(),
        global_threshold: scorer.global_threshold(),
        models: scorer.models(),
    })
}
