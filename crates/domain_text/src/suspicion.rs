//! Text suspicion scoring
//!
//! Wraps an embedder and a text classifier. The outcome is an explicit
//! three-way result rather than a bare float so that callers can tell a
//! genuine low-suspicion narrative from a missing or failed one, while all
//! three still reduce to a score in `[0, 1]`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use core_kernel::{ClaimRecord, FieldValue, ModelError, TextClassifier, TextEmbedder};

use crate::normalizer::normalize_field;

/// Where a scored suspicion value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Calibrated class probability
    Probability,
    /// Hard class label cast to 0.0 / 1.0
    Label,
}

/// Outcome of scoring one narrative
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TextSuspicion {
    /// No narrative text; no signal
    NoText,
    /// The text model produced a score
    Scored { score: f64, source: SignalSource },
    /// Embedding or classification failed; the neutral score is used
    Degraded { reason: String },
}

impl TextSuspicion {
    /// Suspicion probability in `[0, 1]`; 0.0 for the no-signal outcomes
    pub fn score(&self) -> f64 {
        match self {
            TextSuspicion::Scored { score, .. } => *score,
            TextSuspicion::NoText | TextSuspicion::Degraded { .. } => 0.0,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, TextSuspicion::Degraded { .. })
    }
}

/// Scores claim narratives for suspicious language
#[derive(Clone)]
pub struct TextSuspicionScorer {
    embedder: Arc<dyn TextEmbedder>,
    classifier: Arc<dyn TextClassifier>,
}

impl fmt::Debug for TextSuspicionScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSuspicionScorer")
            .field("dimension", &self.embedder.dimension())
            .finish()
    }
}

impl TextSuspicionScorer {
    pub fn new(embedder: Arc<dyn TextEmbedder>, classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            embedder,
            classifier,
        }
    }

    /// Scores the narrative of a claim, found via the narrative aliases
    pub fn score_claim(&self, claim: &ClaimRecord) -> TextSuspicion {
        self.score_value(claim.narrative())
    }

    /// Normalizes and scores any field value
    pub fn score_value(&self, value: Option<&FieldValue>) -> TextSuspicion {
        let cleaned = normalize_field(value);
        self.assess(&cleaned)
    }

    /// Scores already-cleaned text
    pub fn assess(&self, cleaned: &str) -> TextSuspicion {
        if cleaned.is_empty() {
            return TextSuspicion::NoText;
        }

        match self.try_score(cleaned) {
            Ok(outcome) => {
                debug!(score = outcome.score(), "Scored claim narrative");
                outcome
            }
            Err(error) => {
                warn!(%error, "Text suspicion scoring failed, using neutral score");
                TextSuspicion::Degraded {
                    reason: error.to_string(),
                }
            }
        }
    }

    fn try_score(&self, cleaned: &str) -> Result<TextSuspicion, ModelError> {
        let embedding = self.embedder.embed(cleaned)?;
        if embedding.dimension() != self.embedder.dimension() {
            return Err(ModelError::DimensionMismatch {
                expected: self.embedder.dimension(),
                actual: embedding.dimension(),
            });
        }

        match self.classifier.predict_proba(&embedding)? {
            Some(probability) if probability.is_finite() => Ok(TextSuspicion::Scored {
                score: probability.clamp(0.0, 1.0),
                source: SignalSource::Probability,
            }),
            Some(_) => Err(ModelError::NonFiniteOutput),
            None => {
                let suspicious = self.classifier.predict_label(&embedding)?;
                Ok(TextSuspicion::Scored {
                    score: if suspicious { 1.0 } else { 0.0 },
                    source: SignalSource::Label,
                })
            }
        }
    }
}
