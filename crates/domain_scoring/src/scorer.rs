//! Fraud scorer facade
//!
//! Owns the model registry, the ensemble selector and the default
//! threshold profile. One instance is built at startup and shared
//! read-only by every caller.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::ClaimRecord;
use domain_text::TextSuspicionScorer;

use crate::adapter::FeatureInspection;
use crate::artifacts::ArtifactSet;
use crate::config::ScoringConfig;
use crate::ensemble::{EnsembleOutcome, EnsembleSelector};
use crate::error::ScoringError;
use crate::kind::ModelKind;
use crate::registry::{ModelDescriptor, ModelRegistry, ModelRegistryBuilder};
use crate::result::ScoreResult;
use crate::smoke::smoke_sample;
use crate::threshold::ThresholdPair;

/// Which path a claim is scored through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScoringMode {
    /// Primary model with the default threshold profile
    #[default]
    Primary,
    /// Highest-risk result across every model
    Ensemble,
    /// One named model with its own thresholds
    Model(ModelKind),
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Primary => f.write_str("primary"),
            ScoringMode::Ensemble => f.write_str("ensemble"),
            ScoringMode::Model(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(ScoringMode::Primary),
            "ensemble" => Ok(ScoringMode::Ensemble),
            _ => s.parse().map(ScoringMode::Model),
        }
    }
}

impl TryFrom<String> for ScoringMode {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScoringMode> for String {
    fn from(mode: ScoringMode) -> Self {
        mode.to_string()
    }
}

/// The claim scoring pipeline
#[derive(Debug, Clone)]
pub struct FraudScorer {
    registry: ModelRegistry,
    ensemble: EnsembleSelector,
    profile: ThresholdPair,
    global_threshold: Option<f64>,
}

impl FraudScorer {
    /// Wraps a registry; `global_threshold` feeds the default profile
    pub fn new(registry: ModelRegistry, global_threshold: Option<f64>) -> Result<Self, ScoringError> {
        if let Some(global) = global_threshold {
            if !(0.0..=1.0).contains(&global) {
                return Err(ScoringError::InvalidThresholds(format!(
                    "global threshold {global} outside [0, 1]"
                )));
            }
        }

        let text = registry.primary().text_scorer().clone();
        let ensemble = EnsembleSelector::new(registry.adapters().to_vec(), text)?;
        Ok(Self {
            registry,
            ensemble,
            profile: ThresholdPair::default_profile(global_threshold),
            global_threshold,
        })
    }

    /// Binds loaded artifacts according to `config`
    pub fn from_artifacts(artifacts: ArtifactSet, config: &ScoringConfig) -> Result<Self, ScoringError> {
        let text = TextSuspicionScorer::new(
            Arc::new(artifacts.embedder),
            Arc::new(artifacts.text_classifier),
        );

        let registry = artifacts
            .models
            .into_iter()
            .fold(ModelRegistryBuilder::new(text), |builder, model| {
                let kind = model.kind();
                builder.with_model_thresholds(kind, Arc::new(model), config.thresholds.resolve(kind))
            })
            .primary(config.primary_model)
            .build()?;

        Self::new(registry, artifacts.global_threshold)
    }

    /// Loads artifacts from disk and binds them
    pub fn load(config: &ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        let artifacts = ArtifactSet::load(config)?;
        Self::from_artifacts(artifacts, config)
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Cutoffs of the primary single-model path
    pub fn default_profile(&self) -> ThresholdPair {
        self.profile
    }

    pub fn global_threshold(&self) -> Option<f64> {
        self.global_threshold
    }

    pub fn primary_model(&self) -> ModelKind {
        self.registry.primary().kind()
    }

    /// Scores with the primary model and the default profile
    pub fn score(&self, claim: &ClaimRecord) -> Result<ScoreResult, ScoringError> {
        self.registry
            .primary()
            .score_with_thresholds(claim, self.profile)
    }

    /// Scores with one model and that model's thresholds
    pub fn score_with(&self, kind: ModelKind, claim: &ClaimRecord) -> Result<ScoreResult, ScoringError> {
        self.registry.require(kind)?.score(claim)
    }

    /// Scores with every model and keeps the highest-risk result
    pub fn score_ensemble(&self, claim: &ClaimRecord) -> Result<EnsembleOutcome, ScoringError> {
        self.ensemble.evaluate(claim)
    }

    pub fn score_mode(&self, mode: ScoringMode, claim: &ClaimRecord) -> Result<ScoreResult, ScoringError> {
        match mode {
            ScoringMode::Primary => self.score(claim),
            ScoringMode::Ensemble => self.ensemble.score(claim),
            ScoringMode::Model(kind) => self.score_with(kind, claim),
        }
    }

    /// Scores each claim independently; fails on the first prediction error
    pub fn score_batch(&self, claims: &[ClaimRecord], mode: ScoringMode) -> Result<Vec<ScoreResult>, ScoringError> {
        let results = claims
            .iter()
            .map(|claim| self.score_mode(mode, claim))
            .collect::<Result<Vec<_>, _>>()?;
        info!(claims = results.len(), mode = %mode, "Scored claim batch");
        Ok(results)
    }

    /// Feature view of a claim for one model; the primary model by default
    pub fn inspect(&self, kind: Option<ModelKind>, claim: &ClaimRecord) -> Result<FeatureInspection, ScoringError> {
        let adapter = match kind {
            Some(kind) => self.registry.require(kind)?,
            None => self.registry.primary(),
        };
        Ok(adapter.inspect(claim))
    }

    pub fn models(&self) -> Vec<ModelDescriptor> {
        self.registry.descriptors()
    }

    /// Scores the built-in sample claim with every model
    pub fn smoke_check(&self) -> Result<Vec<ScoreResult>, ScoringError> {
        let sample = smoke_sample();
        let results = self
            .registry
            .adapters()
            .iter()
            .map(|adapter| adapter.score(&sample))
            .collect::<Result<Vec<_>, _>>()?;

        for result in &results {
            info!(
                model = %result.model,
                score = result.fraud_risk_score,
                risk_level = ?result.risk_level,
                "Smoke check passed"
            );
        }
        Ok(results)
    }
}
