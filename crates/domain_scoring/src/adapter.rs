//! Model Adapter
//!
//! Binds one tabular classifier to the feature builder and the text
//! suspicion scorer.
//!
//! ```text
//!   ClaimRecord ─┬─► narrative ──► TextSuspicionScorer ──────────┐
//!                │                                               ▼
//!                └─► FeatureBuilder(expected) ──► frame ──► overwrite text column
//!                                                               │
//!                                        numeric pass ◄─────────┘
//!                                             │
//!                                             ▼
//!                                 TabularClassifier::predict_proba
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use core_kernel::{ClaimRecord, ModelError, NumericRow, TabularClassifier};
use domain_features::{BuildReport, FeatureBuilder, TEXT_SUSPICION_COLUMN};
use domain_text::{TextSuspicion, TextSuspicionScorer};

use crate::error::ScoringError;
use crate::kind::ModelKind;
use crate::result::ScoreResult;
use crate::threshold::ThresholdPair;

/// Raw model outputs for one claim
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub fraud_probability: f64,
    pub text: TextSuspicion,
}

/// Debug view of what a model would see for a claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureInspection {
    pub model: ModelKind,
    pub row: NumericRow,
    pub text: TextSuspicion,
    pub report: BuildReport,
}

/// One classifier bound to the scoring pipeline
#[derive(Clone)]
pub struct ModelAdapter {
    kind: ModelKind,
    classifier: Arc<dyn TabularClassifier>,
    thresholds: ThresholdPair,
    features: FeatureBuilder,
    text: TextSuspicionScorer,
}

impl fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("kind", &self.kind)
            .field("thresholds", &self.thresholds)
            .field(
                "expected_features",
                &self.classifier.expected_features().map(<[String]>::len),
            )
            .finish()
    }
}

impl ModelAdapter {
    pub fn new(
        kind: ModelKind,
        classifier: Arc<dyn TabularClassifier>,
        thresholds: ThresholdPair,
        features: FeatureBuilder,
        text: TextSuspicionScorer,
    ) -> Self {
        Self {
            kind,
            classifier,
            thresholds,
            features,
            text,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn thresholds(&self) -> ThresholdPair {
        self.thresholds
    }

    pub fn expected_features(&self) -> Option<&[String]> {
        self.classifier.expected_features()
    }

    pub fn text_scorer(&self) -> &TextSuspicionScorer {
        &self.text
    }

    /// Scores the narrative and then the claim
    pub fn predict(&self, claim: &ClaimRecord) -> Result<Prediction, ScoringError> {
        let text = self.text.score_claim(claim);
        let fraud_probability = self.predict_with_text(claim, &text)?;
        Ok(Prediction {
            fraud_probability,
            text,
        })
    }

    /// Scores a claim whose narrative has already been assessed
    pub fn predict_with_text(&self, claim: &ClaimRecord, text: &TextSuspicion) -> Result<f64, ScoringError> {
        let (row, _) = self.assemble(claim, text);
        self.call_classifier(&row)
    }

    /// Scores and classifies with this model's own thresholds
    pub fn score(&self, claim: &ClaimRecord) -> Result<ScoreResult, ScoringError> {
        self.score_with_thresholds(claim, self.thresholds)
    }

    pub fn score_with_thresholds(
        &self,
        claim: &ClaimRecord,
        thresholds: ThresholdPair,
    ) -> Result<ScoreResult, ScoringError> {
        let prediction = self.predict(claim)?;
        Ok(ScoreResult::new(
            self.kind,
            prediction.fraud_probability,
            prediction.text.score(),
            thresholds,
        ))
    }

    /// Scores with a precomputed narrative outcome and this model's thresholds
    pub fn score_with_text(&self, claim: &ClaimRecord, text: &TextSuspicion) -> Result<ScoreResult, ScoringError> {
        let probability = self.predict_with_text(claim, text)?;
        Ok(ScoreResult::new(self.kind, probability, text.score(), self.thresholds))
    }

    /// The final numeric row and build diagnostics, without predicting
    pub fn inspect(&self, claim: &ClaimRecord) -> FeatureInspection {
        let text = self.text.score_claim(claim);
        let (row, report) = self.assemble(claim, &text);
        FeatureInspection {
            model: self.kind,
            row,
            text,
            report,
        }
    }

    fn assemble(&self, claim: &ClaimRecord, text: &TextSuspicion) -> (NumericRow, BuildReport) {
        let built = self.features.build(claim, self.classifier.expected_features());
        let mut frame = built.frame;
        frame.set_number(TEXT_SUSPICION_COLUMN, text.score());

        let row = frame
            .to_numeric_rows()
            .into_iter()
            .next()
            .unwrap_or_else(|| NumericRow::new(Vec::new(), Vec::new()));
        debug!(model = %self.kind, width = row.len(), "Assembled feature row");
        (row, built.report)
    }

    fn call_classifier(&self, row: &NumericRow) -> Result<f64, ScoringError> {
        let outcome = self.classifier.predict_proba(row).and_then(|probability| {
            if probability.is_finite() {
                Ok(probability.clamp(0.0, 1.0))
            } else {
                Err(ModelError::NonFiniteOutput)
            }
        });

        outcome.map_err(|cause| {
            error!(model = %self.kind, error = %cause, "Prediction failed");
            ScoringError::prediction(self.kind.label(), cause)
        })
    }
}
