//! Scoring configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::kind::ModelKind;
use crate::threshold::ThresholdPair;

/// File names of each artifact inside the artifact directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactFiles {
    pub random_forest: String,
    pub gradient_boosting: String,
    pub logistic_regression: String,
    pub text_model: String,
    pub embedder: String,
    pub threshold: String,
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            random_forest: "random_forest.json".to_string(),
            gradient_boosting: "gradient_boosting.json".to_string(),
            logistic_regression: "logistic_regression.json".to_string(),
            text_model: "text_model.json".to_string(),
            embedder: "embedder.json".to_string(),
            threshold: "threshold.txt".to_string(),
        }
    }
}

impl ArtifactFiles {
    /// File name of a tabular model artifact
    pub fn model(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::RandomForest => &self.random_forest,
            ModelKind::GradientBoosting => &self.gradient_boosting,
            ModelKind::LogisticRegression => &self.logistic_regression,
        }
    }
}

/// Per-model cutoff overrides; unset models use their documented defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdOverrides {
    pub rfc: Option<ThresholdPair>,
    pub gbc: Option<ThresholdPair>,
    pub lr: Option<ThresholdPair>,
}

impl ThresholdOverrides {
    /// Thresholds to bind for a model
    pub fn resolve(&self, kind: ModelKind) -> ThresholdPair {
        let configured = match kind {
            ModelKind::RandomForest => self.rfc,
            ModelKind::GradientBoosting => self.gbc,
            ModelKind::LogisticRegression => self.lr,
        };
        configured.unwrap_or_else(|| kind.default_thresholds())
    }
}

/// Scoring pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Directory holding every artifact file
    pub artifact_dir: PathBuf,

    pub files: ArtifactFiles,

    /// Tabular models to load, in ensemble order
    pub models: Vec<ModelKind>,

    /// Model used for single-claim scoring
    pub primary_model: ModelKind,

    pub thresholds: ThresholdOverrides,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("models"),
            files: ArtifactFiles::default(),
            models: ModelKind::ALL.to_vec(),
            primary_model: ModelKind::RandomForest,
            thresholds: ThresholdOverrides::default(),
        }
    }
}

impl ScoringConfig {
    /// Default configuration reading artifacts from `dir`
    pub fn with_artifact_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn artifact_path(&self, file: &str) -> PathBuf {
        self.artifact_dir.join(file)
    }

    pub fn model_path(&self, kind: ModelKind) -> PathBuf {
        self.artifact_path(self.files.model(kind))
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// Checks that the model list is usable
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.models.is_empty() {
            return Err(ScoringError::configuration("at least one model must be configured"));
        }
        for (position, kind) in self.models.iter().enumerate() {
            if self.models[..position].contains(kind) {
                return Err(ScoringError::configuration(format!("model {kind} listed twice")));
            }
        }
        if !self.models.contains(&self.primary_model) {
            return Err(ScoringError::configuration(format!(
                "primary model {} is not in the loaded model list",
                self.primary_model
            )));
        }
        Ok(())
    }
}
