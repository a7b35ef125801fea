//! Test Doubles for Model Ports
//!
//! Stand-ins for tabular classifiers, text classifiers and embedders so
//! pipeline behavior can be tested without real artifacts.

use std::sync::atomic::{AtomicUsize, Ordering};

use core_kernel::{Embedding, ModelError, NumericRow, TabularClassifier, TextClassifier, TextEmbedder};

/// Tabular classifier returning a fixed probability
#[derive(Debug)]
pub struct FixedClassifier {
    probability: f64,
    features: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    /// A classifier that declares no expected features
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            features: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A classifier that declares `features` and checks row columns against them
    pub fn with_features(probability: f64, features: &[&str]) -> Self {
        Self {
            features: Some(features.iter().map(|f| f.to_string()).collect()),
            ..Self::new(probability)
        }
    }

    /// Number of predictions served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TabularClassifier for FixedClassifier {
    fn expected_features(&self) -> Option<&[String]> {
        self.features.as_deref()
    }

    fn predict_proba(&self, row: &NumericRow) -> Result<f64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(features) = &self.features {
            if row.columns() != features.as_slice() {
                return Err(ModelError::schema(format!(
                    "expected {features:?}, got {:?}",
                    row.columns()
                )));
            }
        }
        Ok(self.probability)
    }
}

/// Tabular classifier that always fails
#[derive(Debug)]
pub struct FailingClassifier {
    error: ModelError,
}

impl FailingClassifier {
    pub fn new(error: ModelError) -> Self {
        Self { error }
    }

    /// Fails with a schema mismatch
    pub fn schema_mismatch() -> Self {
        Self::new(ModelError::schema("feature 'policy_state' not seen during fit"))
    }
}

impl TabularClassifier for FailingClassifier {
    fn expected_features(&self) -> Option<&[String]> {
        None
    }

    fn predict_proba(&self, _row: &NumericRow) -> Result<f64, ModelError> {
        Err(self.error.clone())
    }
}

/// One-dimensional embedder: 1.0 when any keyword occurs, else 0.0
#[derive(Debug, Clone)]
pub struct KeywordEmbedder {
    keywords: Vec<String>,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl TextEmbedder for KeywordEmbedder {
    fn dimension(&self) -> usize {
        1
    }

    fn embed(&self, text: &str) -> Result<Embedding, ModelError> {
        let hit = text
            .split_whitespace()
            .any(|token| self.keywords.iter().any(|k| k == token.trim_matches('.')));
        Ok(Embedding::new(vec![if hit { 1.0 } else { 0.0 }]))
    }
}

/// Embedder that always fails
#[derive(Debug, Default)]
pub struct FailingEmbedder;

impl TextEmbedder for FailingEmbedder {
    fn dimension(&self) -> usize {
        1
    }

    fn embed(&self, _text: &str) -> Result<Embedding, ModelError> {
        Err(ModelError::unavailable("embedding backend offline"))
    }
}

/// Text classifier mapping the first embedding value to one of two outputs
///
/// With `calibrated` false it only reports hard labels.
#[derive(Debug, Clone)]
pub struct ThresholdTextClassifier {
    hit: f64,
    miss: f64,
    calibrated: bool,
}

impl ThresholdTextClassifier {
    pub fn new(hit: f64, miss: f64) -> Self {
        Self {
            hit,
            miss,
            calibrated: true,
        }
    }

    /// A classifier without probability output
    pub fn uncalibrated() -> Self {
        Self {
            hit: 1.0,
            miss: 0.0,
            calibrated: false,
        }
    }

    fn is_hit(embedding: &Embedding) -> bool {
        embedding.as_slice().first().is_some_and(|v| *v > 0.0)
    }
}

impl TextClassifier for ThresholdTextClassifier {
    fn predict_proba(&self, embedding: &Embedding) -> Result<Option<f64>, ModelError> {
        if !self.calibrated {
            return Ok(None);
        }
        Ok(Some(if Self::is_hit(embedding) { self.hit } else { self.miss }))
    }

    fn predict_label(&self, embedding: &Embedding) -> Result<bool, ModelError> {
        Ok(Self::is_hit(embedding))
    }
}
