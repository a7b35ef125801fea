//! Tabular model artifacts
//!
//! Three classifier families share the [`TabularClassifier`] port. Each
//! validates its input row against the feature list it was fitted on
//! before evaluating, so a schema drift surfaces as a prediction error
//! instead of a silently wrong score.

use serde::Deserialize;

use core_kernel::{sigmoid, ModelError, NumericRow, TabularClassifier};

use crate::error::ArtifactError;
use crate::kind::ModelKind;
use crate::tree::{DecisionTree, TreeSpec};

#[derive(Debug, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
enum ModelSpec {
    RandomForest {
        feature_names: Vec<String>,
        trees: Vec<TreeSpec>,
    },
    GradientBoosting {
        feature_names: Vec<String>,
        init: f64,
        learning_rate: f64,
        trees: Vec<TreeSpec>,
    },
    LogisticRegression {
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

/// Checks width, column order and finiteness of a row
fn check_row(features: &[String], row: &NumericRow) -> Result<(), ModelError> {
    if row.len() != features.len() {
        return Err(ModelError::DimensionMismatch {
            expected: features.len(),
            actual: row.len(),
        });
    }
    if let Some((expected, actual)) = features
        .iter()
        .zip(row.columns())
        .find(|(expected, actual)| expected != actual)
    {
        return Err(ModelError::schema(format!(
            "expected column '{expected}', got '{actual}'"
        )));
    }
    check_finite(row)
}

fn check_finite(row: &NumericRow) -> Result<(), ModelError> {
    match row.iter().find(|(_, value)| !value.is_finite()) {
        Some((column, _)) => Err(ModelError::NonFiniteInput {
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_features(kind: ModelKind, features: &[String]) -> Result<(), ArtifactError> {
    if features.is_empty() {
        return Err(ArtifactError::invalid(kind.algorithm(), "feature_names is empty"));
    }
    for (position, name) in features.iter().enumerate() {
        if features[..position].contains(name) {
            return Err(ArtifactError::invalid(
                kind.algorithm(),
                format!("duplicate feature '{name}'"),
            ));
        }
    }
    Ok(())
}

fn compile_trees(
    kind: ModelKind,
    specs: &[TreeSpec],
    features: &[String],
) -> Result<Vec<DecisionTree>, ArtifactError> {
    if specs.is_empty() {
        return Err(ArtifactError::invalid(kind.algorithm(), "model has no trees"));
    }
    specs
        .iter()
        .enumerate()
        .map(|(position, spec)| {
            DecisionTree::compile(spec, features)
                .map_err(|reason| ArtifactError::invalid(kind.algorithm(), format!("tree {position}: {reason}")))
        })
        .collect()
}

/// Random forest: probability is the mean of the trees' leaf values
#[derive(Debug, Clone)]
pub struct ForestModel {
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl ForestModel {
    pub fn new(feature_names: Vec<String>, trees: &[TreeSpec]) -> Result<Self, ArtifactError> {
        let kind = ModelKind::RandomForest;
        check_features(kind, &feature_names)?;
        let trees = compile_trees(kind, trees, &feature_names)?;
        if let Some(leaf) = trees
            .iter()
            .flat_map(DecisionTree::leaves)
            .find(|leaf| !(0.0..=1.0).contains(leaf))
        {
            return Err(ArtifactError::invalid(
                kind.algorithm(),
                format!("leaf probability {leaf} outside [0, 1]"),
            ));
        }
        Ok(Self { feature_names, trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl TabularClassifier for ForestModel {
    fn expected_features(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn predict_proba(&self, row: &NumericRow) -> Result<f64, ModelError> {
        check_row(&self.feature_names, row)?;
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(row.values())).sum();
        Ok(total / self.trees.len() as f64)
    }
}

/// Gradient boosting: `sigmoid(init + learning_rate * sum of leaves)`
#[derive(Debug, Clone)]
pub struct BoostedModel {
    feature_names: Vec<String>,
    init: f64,
    learning_rate: f64,
    trees: Vec<DecisionTree>,
}

impl BoostedModel {
    pub fn new(
        feature_names: Vec<String>,
        init: f64,
        learning_rate: f64,
        trees: &[TreeSpec],
    ) -> Result<Self, ArtifactError> {
        let kind = ModelKind::GradientBoosting;
        check_features(kind, &feature_names)?;
        if !init.is_finite() || !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(ArtifactError::invalid(
                kind.algorithm(),
                "init must be finite and learning_rate positive",
            ));
        }
        let trees = compile_trees(kind, trees, &feature_names)?;
        Ok(Self {
            feature_names,
            init,
            learning_rate,
            trees,
        })
    }
}

impl TabularClassifier for BoostedModel {
    fn expected_features(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }

    fn predict_proba(&self, row: &NumericRow) -> Result<f64, ModelError> {
        check_row(&self.feature_names, row)?;
        let boost: f64 = self.trees.iter().map(|tree| tree.evaluate(row.values())).sum();
        Ok(sigmoid(self.init + self.learning_rate * boost))
    }
}

/// Logistic regression over a fixed coefficient vector
///
/// An artifact may omit its feature names; rows are then only checked for
/// width.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    feature_names: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(
        feature_names: Option<Vec<String>>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, ArtifactError> {
        let kind = ModelKind::LogisticRegression;
        if coefficients.is_empty() {
            return Err(ArtifactError::invalid(kind.algorithm(), "coefficients are empty"));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::invalid(kind.algorithm(), "non-finite coefficient"));
        }
        if let Some(names) = &feature_names {
            check_features(kind, names)?;
            if names.len() != coefficients.len() {
                return Err(ArtifactError::invalid(
                    kind.algorithm(),
                    format!(
                        "{} feature names for {} coefficients",
                        names.len(),
                        coefficients.len()
                    ),
                ));
            }
        }
        Ok(Self {
            feature_names,
            coefficients,
            intercept,
        })
    }
}

impl TabularClassifier for LogisticModel {
    fn expected_features(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, row: &NumericRow) -> Result<f64, ModelError> {
        match &self.feature_names {
            Some(names) => check_row(names, row)?,
            None if row.len() != self.coefficients.len() => {
                return Err(ModelError::DimensionMismatch {
                    expected: self.coefficients.len(),
                    actual: row.len(),
                })
            }
            None => check_finite(row)?,
        }
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.values())
                .map(|(c, v)| c * v)
                .sum::<f64>();
        Ok(sigmoid(z))
    }
}

/// Any loaded tabular model
#[derive(Debug, Clone)]
pub enum TabularModel {
    RandomForest(ForestModel),
    GradientBoosting(BoostedModel),
    LogisticRegression(LogisticModel),
}

impl TabularModel {
    /// Parses and validates an artifact document
    ///
    /// `artifact` names the source in error messages.
    pub fn from_json(artifact: &str, json: &str) -> Result<Self, ArtifactError> {
        let spec: ModelSpec = serde_json::from_str(json).map_err(|source| ArtifactError::Corrupt {
            artifact: artifact.to_string(),
            source,
        })?;

        let model = match spec {
            ModelSpec::RandomForest { feature_names, trees } => {
                TabularModel::RandomForest(ForestModel::new(feature_names, &trees)?)
            }
            ModelSpec::GradientBoosting {
                feature_names,
                init,
                learning_rate,
                trees,
            } => TabularModel::GradientBoosting(BoostedModel::new(feature_names, init, learning_rate, &trees)?),
            ModelSpec::LogisticRegression {
                feature_names,
                coefficients,
                intercept,
            } => TabularModel::LogisticRegression(LogisticModel::new(feature_names, coefficients, intercept)?),
        };
        Ok(model)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            TabularModel::RandomForest(_) => ModelKind::RandomForest,
            TabularModel::GradientBoosting(_) => ModelKind::GradientBoosting,
            TabularModel::LogisticRegression(_) => ModelKind::LogisticRegression,
        }
    }

    fn inner(&self) -> &dyn TabularClassifier {
        match self {
            TabularModel::RandomForest(model) => model,
            TabularModel::GradientBoosting(model) => model,
            TabularModel::LogisticRegression(model) => model,
        }
    }
}

impl TabularClassifier for TabularModel {
    fn expected_features(&self) -> Option<&[String]> {
        self.inner().expected_features()
    }

    fn predict_proba(&self, row: &NumericRow) -> Result<f64, ModelError> {
        self.inner().predict_proba(row)
    }
}
