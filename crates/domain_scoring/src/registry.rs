//! Model Registry
//!
//! Central place where loaded classifiers are bound to the pipeline. The
//! registry is built once at startup and is read-only afterwards; every
//! request looks adapters up here.
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = ModelRegistryBuilder::new(text_scorer)
//!     .with_model(ModelKind::RandomForest, Arc::new(forest))
//!     .with_model_thresholds(ModelKind::LogisticRegression, Arc::new(lr), pair)
//!     .primary(ModelKind::RandomForest)
//!     .build()?;
//!
//! let result = registry.require(ModelKind::LogisticRegression)?.score(&claim)?;
//! ```

use std::sync::Arc;

use serde::Serialize;

use core_kernel::TabularClassifier;
use domain_features::FeatureBuilder;
use domain_text::TextSuspicionScorer;

use crate::adapter::ModelAdapter;
use crate::error::ScoringError;
use crate::kind::ModelKind;
use crate::threshold::ThresholdPair;

/// Public description of a bound model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub model: ModelKind,
    pub name: &'static str,
    pub thresholds: ThresholdPair,
    pub expected_features: Option<Vec<String>>,
    pub primary: bool,
}

/// Bound model adapters, in registration order
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    adapters: Vec<ModelAdapter>,
    primary: usize,
}

impl ModelRegistry {
    pub fn get(&self, kind: ModelKind) -> Option<&ModelAdapter> {
        self.adapters.iter().find(|adapter| adapter.kind() == kind)
    }

    /// Like [`ModelRegistry::get`] but fails for unbound models
    pub fn require(&self, kind: ModelKind) -> Result<&ModelAdapter, ScoringError> {
        self.get(kind)
            .ok_or_else(|| ScoringError::ModelNotLoaded(kind.label().to_string()))
    }

    pub fn primary(&self) -> &ModelAdapter {
        &self.adapters[self.primary]
    }

    pub fn adapters(&self) -> &[ModelAdapter] {
        &self.adapters
    }

    pub fn kinds(&self) -> Vec<ModelKind> {
        self.adapters.iter().map(ModelAdapter::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn descriptors(&self) -> Vec<ModelDescriptor> {
        let primary = self.primary().kind();
        self.adapters
            .iter()
            .map(|adapter| ModelDescriptor {
                model: adapter.kind(),
                name: adapter.kind().display_name(),
                thresholds: adapter.thresholds(),
                expected_features: adapter.expected_features().map(<[String]>::to_vec),
                primary: adapter.kind() == primary,
            })
            .collect()
    }
}

/// Builder for creating model registries
pub struct ModelRegistryBuilder {
    text: TextSuspicionScorer,
    features: FeatureBuilder,
    entries: Vec<(ModelKind, Arc<dyn TabularClassifier>, ThresholdPair)>,
    primary: Option<ModelKind>,
}

impl ModelRegistryBuilder {
    /// Creates a builder; every adapter shares `text`
    pub fn new(text: TextSuspicionScorer) -> Self {
        Self {
            text,
            features: FeatureBuilder::default(),
            entries: Vec::new(),
            primary: None,
        }
    }

    /// Replaces the default feature builder
    pub fn with_features(mut self, features: FeatureBuilder) -> Self {
        self.features = features;
        self
    }

    /// Binds a model with its documented thresholds
    pub fn with_model(self, kind: ModelKind, classifier: Arc<dyn TabularClassifier>) -> Self {
        self.with_model_thresholds(kind, classifier, kind.default_thresholds())
    }

    /// Binds a model with explicit thresholds
    pub fn with_model_thresholds(
        mut self,
        kind: ModelKind,
        classifier: Arc<dyn TabularClassifier>,
        thresholds: ThresholdPair,
    ) -> Self {
        self.entries.push((kind, classifier, thresholds));
        self
    }

    /// Sets the primary model; defaults to the first one bound
    pub fn primary(mut self, kind: ModelKind) -> Self {
        self.primary = Some(kind);
        self
    }

    pub fn build(self) -> Result<ModelRegistry, ScoringError> {
        let Some((first, _, _)) = self.entries.first() else {
            return Err(ScoringError::configuration("registry needs at least one model"));
        };
        let primary_kind = self.primary.unwrap_or(*first);

        let mut adapters: Vec<ModelAdapter> = Vec::with_capacity(self.entries.len());
        for (kind, classifier, thresholds) in self.entries {
            if adapters.iter().any(|adapter| adapter.kind() == kind) {
                return Err(ScoringError::configuration(format!("model {kind} bound twice")));
            }
            adapters.push(ModelAdapter::new(
                kind,
                classifier,
                thresholds,
                self.features.clone(),
                self.text.clone(),
            ));
        }

        let primary = adapters
            .iter()
            .position(|adapter| adapter.kind() == primary_kind)
            .ok_or_else(|| ScoringError::ModelNotLoaded(primary_kind.label().to_string()))?;

        Ok(ModelRegistry { adapters, primary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Embedding, ModelError, NumericRow, TextClassifier, TextEmbedder};

    struct Constant(f64);

    impl TabularClassifier for Constant {
        fn expected_features(&self) -> Option<&[String]> {
            None
        }

        fn predict_proba(&self, _row: &NumericRow) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct Silent;

    impl TextEmbedder for Silent {
        fn dimension(&self) -> usize {
            1
        }

        fn embed(&self, _text: &str) -> Result<Embedding, ModelError> {
            Ok(Embedding::zeros(1))
        }
    }

    impl TextClassifier for Silent {
        fn predict_proba(&self, _embedding: &Embedding) -> Result<Option<f64>, ModelError> {
            Ok(Some(0.0))
        }

        fn predict_label(&self, _embedding: &Embedding) -> Result<bool, ModelError> {
            Ok(false)
        }
    }

    fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::new(TextSuspicionScorer::new(Arc::new(Silent), Arc::new(Silent)))
    }

    #[test]
    fn test_builder_fluent_api() {
        let registry = builder()
            .with_model(ModelKind::RandomForest, Arc::new(Constant(0.1)))
            .with_model(ModelKind::LogisticRegression, Arc::new(Constant(0.2)))
            .primary(ModelKind::LogisticRegression)
            .build()
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.primary().kind(), ModelKind::LogisticRegression);
        assert_eq!(
            registry.kinds(),
            vec![ModelKind::RandomForest, ModelKind::LogisticRegression]
        );
        assert!(registry.get(ModelKind::GradientBoosting).is_none());
        assert!(matches!(
            registry.require(ModelKind::GradientBoosting),
            Err(ScoringError::ModelNotLoaded(_))
        ));
    }

    #[test]
    fn test_primary_defaults_to_first() {
        let registry = builder()
            .with_model(ModelKind::GradientBoosting, Arc::new(Constant(0.1)))
            .build()
            .unwrap();
        assert_eq!(registry.primary().kind(), ModelKind::GradientBoosting);
    }

    #[test]
    fn test_build_rejects_bad_setups() {
        assert!(builder().build().is_err());
        assert!(builder()
            .with_model(ModelKind::RandomForest, Arc::new(Constant(0.1)))
            .with_model(ModelKind::RandomForest, Arc::new(Constant(0.2)))
            .build()
            .is_err());
        assert!(builder()
            .with_model(ModelKind::RandomForest, Arc::new(Constant(0.1)))
            .primary(ModelKind::LogisticRegression)
            .build()
            .is_err());
    }

    #[test]
    fn test_descriptors() {
        let pair = ThresholdPair::new(0.1, 0.9).unwrap();
        let registry = builder()
            .with_model_thresholds(ModelKind::RandomForest, Arc::new(Constant(0.1)), pair)
            .build()
            .unwrap();

        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "Random Forest");
        assert_eq!(descriptors[0].thresholds, pair);
        assert!(descriptors[0].primary);
        assert!(descriptors[0].expected_features.is_none());
    }
}
