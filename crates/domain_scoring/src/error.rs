//! Scoring domain errors

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::ModelError;
use domain_text::TextError;

/// Errors that can occur while scoring claims
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The tabular classifier failed; never defaulted to a score
    #[error("Prediction failed for model {model}: {cause}")]
    Prediction { model: String, cause: ModelError },

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl ScoringError {
    pub fn prediction(model: impl Into<String>, cause: ModelError) -> Self {
        ScoringError::Prediction {
            model: model.into(),
            cause,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ScoringError::Configuration(message.into())
    }

    /// True for the prediction error kind
    pub fn is_prediction(&self) -> bool {
        matches!(self, ScoringError::Prediction { .. })
    }
}

/// Errors raised while loading model artifacts
///
/// Every variant is fatal to startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {artifact}: {source}")]
    Corrupt {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {artifact}: {reason}")]
    Invalid { artifact: String, reason: String },

    #[error("Invalid text artifact {artifact}: {source}")]
    Text {
        artifact: String,
        #[source]
        source: TextError,
    },

    #[error("Invalid threshold file {}: {value:?}", path.display())]
    Threshold { path: PathBuf, value: String },
}

impl ArtifactError {
    pub fn invalid(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_error_carries_cause() {
        let error = ScoringError::prediction(
            "rfc",
            ModelError::DimensionMismatch {
                expected: 7,
                actual: 3,
            },
        );
        assert!(error.is_prediction());
        assert_eq!(
            error.to_string(),
            "Prediction failed for model rfc: Dimension mismatch: expected 7 values, got 3"
        );
    }

    #[test]
    fn test_artifact_error_is_transparent() {
        let error: ScoringError = ArtifactError::Missing {
            path: PathBuf::from("models/random_forest.json"),
        }
        .into();
        assert!(!error.is_prediction());
        assert_eq!(error.to_string(), "Artifact file not found: models/random_forest.json");
    }
}
