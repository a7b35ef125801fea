//! Test Data Builders
//!
//! Provides builder patterns for constructing claims and stub-backed
//! scorers with sensible defaults. Tests specify only the fields that
//! matter to them.

use std::sync::Arc;

use core_kernel::{ClaimRecord, FieldValue, TabularClassifier, TextClassifier, TextEmbedder};
use domain_scoring::{FraudScorer, ModelKind, ModelRegistryBuilder, ThresholdPair};
use domain_text::TextSuspicionScorer;

use crate::fixtures::ClaimFixtures;
use crate::stubs::{FixedClassifier, KeywordEmbedder, ThresholdTextClassifier};

/// Builder for claim records
#[derive(Debug, Clone, Default)]
pub struct ClaimRecordBuilder {
    record: ClaimRecord,
}

impl ClaimRecordBuilder {
    /// Starts from an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the complete smoke sample
    pub fn from_smoke_sample() -> Self {
        Self {
            record: ClaimFixtures::smoke_sample(),
        }
    }

    pub fn months_as_customer(self, months: i64) -> Self {
        self.field("months_as_customer", months)
    }

    pub fn total_claim_amount(self, amount: f64) -> Self {
        self.field("total_claim_amount", amount)
    }

    pub fn policy_annual_premium(self, premium: f64) -> Self {
        self.field("policy_annual_premium", premium)
    }

    pub fn incident_severity(self, severity: &str) -> Self {
        self.field("incident_severity", severity)
    }

    pub fn narrative(self, text: &str) -> Self {
        self.field("claim_description", text)
    }

    pub fn dates(self, policy_bind_date: &str, incident_date: &str) -> Self {
        self.field("policy_bind_date", policy_bind_date)
            .field("incident_date", incident_date)
    }

    /// Sets any field
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.record.insert(name, value);
        self
    }

    /// Removes a field
    pub fn without(mut self, name: &str) -> Self {
        self.record.remove(name);
        self
    }

    pub fn build(self) -> ClaimRecord {
        self.record
    }
}

/// Builder for scorers backed by stub models
///
/// The default text model scores 0.9 when the narrative mentions
/// "stolen" or "payout" and 0.1 otherwise.
pub struct StubScorerBuilder {
    embedder: Arc<dyn TextEmbedder>,
    text_classifier: Arc<dyn TextClassifier>,
    models: Vec<(ModelKind, Arc<dyn TabularClassifier>)>,
    primary: Option<ModelKind>,
    global_threshold: Option<f64>,
}

impl Default for StubScorerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StubScorerBuilder {
    pub fn new() -> Self {
        Self {
            embedder: Arc::new(KeywordEmbedder::new(&["stolen", "payout"])),
            text_classifier: Arc::new(ThresholdTextClassifier::new(0.9, 0.1)),
            models: Vec::new(),
            primary: None,
            global_threshold: None,
        }
    }

    /// Binds a model that always returns `probability`
    pub fn with_fixed(self, kind: ModelKind, probability: f64) -> Self {
        self.with_classifier(kind, Arc::new(FixedClassifier::new(probability)))
    }

    pub fn with_classifier(mut self, kind: ModelKind, classifier: Arc<dyn TabularClassifier>) -> Self {
        self.models.push((kind, classifier));
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn TextEmbedder>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn with_text_classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.text_classifier = classifier;
        self
    }

    pub fn primary(mut self, kind: ModelKind) -> Self {
        self.primary = Some(kind);
        self
    }

    pub fn global_threshold(mut self, threshold: f64) -> Self {
        self.global_threshold = Some(threshold);
        self
    }

    pub fn text_scorer(&self) -> TextSuspicionScorer {
        TextSuspicionScorer::new(self.embedder.clone(), self.text_classifier.clone())
    }

    /// Builds the scorer; every model uses its documented thresholds
    pub fn build(self) -> FraudScorer {
        let mut registry = ModelRegistryBuilder::new(self.text_scorer());
        for (kind, classifier) in self.models {
            registry = registry.with_model(kind, classifier);
        }
        if let Some(primary) = self.primary {
            registry = registry.primary(primary);
        }
        let registry = registry.build().expect("stub registry is valid");
        FraudScorer::new(registry, self.global_threshold).expect("stub scorer is valid")
    }

    /// Builds with explicit thresholds for every model
    pub fn build_with_thresholds(self, thresholds: ThresholdPair) -> FraudScorer {
        let mut registry = ModelRegistryBuilder::new(self.text_scorer());
        for (kind, classifier) in self.models {
            registry = registry.with_model_thresholds(kind, classifier, thresholds);
        }
        let registry = registry.build().expect("stub registry is valid");
        FraudScorer::new(registry, self.global_threshold).expect("stub scorer is valid")
    }
}
