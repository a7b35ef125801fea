//! Scoring Domain
//!
//! This crate turns claim records into fraud risk decisions:
//! - Tabular model artifacts (random forest, gradient boosting, logistic regression)
//! - Model adapters binding a classifier to feature building and text scoring
//! - Threshold policy mapping probabilities to risk tiers and decisions
//! - Ensemble selection of the highest-risk result
//! - Artifact loading, model registry and the `FraudScorer` facade
//!
//! # Pipeline
//!
//! ```text
//!                      ┌────────────── FraudScorer ──────────────┐
//!   ClaimRecord ──────►│ primary / named model ──► ModelAdapter  │──► ScoreResult
//!                      │ ensemble ──► ModelAdapter × N ──► max   │
//!                      └─────────────────────────────────────────┘
//!                                         │
//!                          ThresholdPair::classify(probability)
//! ```

pub mod error;
pub mod kind;
pub mod threshold;
pub mod result;
pub mod tree;
pub mod models;
pub mod adapter;
pub mod ensemble;
pub mod config;
pub mod artifacts;
pub mod registry;
pub mod smoke;
pub mod scorer;

pub use error::{ArtifactError, ScoringError};
pub use kind::ModelKind;
pub use threshold::{classify, Decision, RiskLevel, ThresholdPair, DEFAULT_GLOBAL_THRESHOLD};
pub use result::ScoreResult;
pub use models::{BoostedModel, ForestModel, LogisticModel, TabularModel};
pub use adapter::{FeatureInspection, ModelAdapter, Prediction};
pub use ensemble::{select_highest, EnsembleOutcome, EnsembleSelector};
pub use config::{ArtifactFiles, ScoringConfig, ThresholdOverrides};
pub use artifacts::{read_threshold, ArtifactSet};
pub use registry::{ModelDescriptor, ModelRegistry, ModelRegistryBuilder};
pub use smoke::smoke_sample;
pub use scorer::{FraudScorer, ScoringMode};
