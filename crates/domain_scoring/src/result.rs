//! Score results

use serde::{Deserialize, Serialize};

use crate::kind::ModelKind;
use crate::threshold::{Decision, RiskLevel, ThresholdPair};

/// The outcome of scoring one claim with one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Fraud probability in `[0, 1]`
    pub fraud_risk_score: f64,
    /// Narrative suspicion in `[0, 1]`; 0.0 when there was no usable text
    pub text_suspicion_score: f64,
    pub risk_level: RiskLevel,
    pub decision: Decision,
    /// Low (auto-approve) cutoff that was applied
    pub threshold_used: f64,
    /// Model that produced the score
    pub model: ModelKind,
}

impl ScoreResult {
    /// Applies a threshold pair to a model's outputs
    pub fn new(
        model: ModelKind,
        fraud_risk_score: f64,
        text_suspicion_score: f64,
        thresholds: ThresholdPair,
    ) -> Self {
        let (risk_level, decision) = thresholds.classify(fraud_risk_score);
        Self {
            fraud_risk_score,
            text_suspicion_score,
            risk_level,
            decision,
            threshold_used: thresholds.low(),
            model,
        }
    }
}
