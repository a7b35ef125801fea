//! Artifact loading
//!
//! All artifacts are read once at startup. Any missing or malformed file
//! aborts loading; the threshold file is the only optional artifact.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use core_kernel::TextEmbedder;
use domain_text::{Embedder, LinearTextClassifier};

use crate::config::ScoringConfig;
use crate::error::ArtifactError;
use crate::kind::ModelKind;
use crate::models::TabularModel;

/// Every artifact the scoring pipeline needs
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub models: Vec<TabularModel>,
    pub embedder: Embedder,
    pub text_classifier: LinearTextClassifier,
    pub global_threshold: Option<f64>,
}

impl ArtifactSet {
    /// Loads the configured models, the text artifacts and the threshold
    pub fn load(config: &ScoringConfig) -> Result<Self, ArtifactError> {
        info!(dir = %config.artifact_dir().display(), "Loading model artifacts");

        let models = config
            .models
            .iter()
            .map(|&kind| load_model(config, kind))
            .collect::<Result<Vec<_>, _>>()?;

        let embedder_file = &config.files.embedder;
        let embedder = Embedder::from_json(&read(&config.artifact_path(embedder_file))?).map_err(|source| {
            ArtifactError::Text {
                artifact: embedder_file.clone(),
                source,
            }
        })?;

        let text_file = &config.files.text_model;
        let text_classifier = LinearTextClassifier::from_json(&read(&config.artifact_path(text_file))?)
            .map_err(|source| ArtifactError::Text {
                artifact: text_file.clone(),
                source,
            })?;

        if embedder.dimension() != text_classifier.dimension() {
            return Err(ArtifactError::invalid(
                text_file.clone(),
                format!(
                    "classifier expects {} inputs but the embedder produces {}",
                    text_classifier.dimension(),
                    embedder.dimension()
                ),
            ));
        }

        let global_threshold = read_threshold(&config.artifact_path(&config.files.threshold))?;

        info!(
            models = models.len(),
            text_dimension = text_classifier.dimension(),
            global_threshold = ?global_threshold,
            "Model artifacts loaded"
        );

        Ok(Self {
            models,
            embedder,
            text_classifier,
            global_threshold,
        })
    }
}

fn load_model(config: &ScoringConfig, kind: ModelKind) -> Result<TabularModel, ArtifactError> {
    let file = config.files.model(kind);
    let model = TabularModel::from_json(file, &read(&config.model_path(kind))?)?;
    if model.kind() != kind {
        return Err(ArtifactError::invalid(
            file,
            format!("expected a {} artifact, found {}", kind.algorithm(), model.kind().algorithm()),
        ));
    }
    info!(model = %kind, file, "Loaded tabular model");
    Ok(model)
}

fn read(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Reads the optional global threshold
///
/// Returns `None` when the file does not exist. The value must be a
/// single number in `[0, 1]`.
pub fn read_threshold(path: &Path) -> Result<Option<f64>, ArtifactError> {
    let content = match read(path) {
        Ok(content) => content,
        Err(ArtifactError::Missing { .. }) => {
            info!(path = %path.display(), "No threshold file, using default profile");
            return Ok(None);
        }
        Err(error) => return Err(error),
    };

    let value = content.trim();
    match value.parse::<f64>() {
        Ok(threshold) if (0.0..=1.0).contains(&threshold) => Ok(Some(threshold)),
        _ => Err(ArtifactError::Threshold {
            path: path.to_path_buf(),
            value: value.to_string(),
        }),
    }
}
