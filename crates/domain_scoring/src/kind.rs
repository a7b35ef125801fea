//! Tabular model kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::threshold::ThresholdPair;

/// The tabular classifier families the pipeline can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    /// Sensitivity-first safety net
    #[serde(rename = "rfc", alias = "random_forest")]
    RandomForest,
    /// Conservative baseline
    #[serde(rename = "gbc", alias = "gradient_boosting")]
    GradientBoosting,
    /// Balanced primary
    #[serde(rename = "lr", alias = "logistic_regression")]
    LogisticRegression,
}

impl ModelKind {
    /// All kinds, in ensemble evaluation order
    pub const ALL: [ModelKind; 3] = [
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
        ModelKind::LogisticRegression,
    ];

    /// Short label used in APIs and logs
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "rfc",
            ModelKind::GradientBoosting => "gbc",
            ModelKind::LogisticRegression => "lr",
        }
    }

    /// Value of the `algorithm` field in the artifact
    pub fn algorithm(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoosting => "gradient_boosting",
            ModelKind::LogisticRegression => "logistic_regression",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
            ModelKind::LogisticRegression => "Logistic Regression",
        }
    }

    /// Documented low/high cutoffs for this kind
    pub fn default_thresholds(&self) -> ThresholdPair {
        let (low, high) = match self {
            ModelKind::RandomForest => (0.20, 0.50),
            ModelKind::GradientBoosting => (0.30, 0.60),
            ModelKind::LogisticRegression => (0.50, 0.70),
        };
        ThresholdPair::from_constants(low, high)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.label() == wanted || kind.algorithm() == wanted)
            .ok_or_else(|| ScoringError::UnknownModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_and_algorithms() {
        assert_eq!("rfc".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert_eq!(" GBC ".parse::<ModelKind>().unwrap(), ModelKind::GradientBoosting);
        assert_eq!(
            "logistic_regression".parse::<ModelKind>().unwrap(),
            ModelKind::LogisticRegression
        );
        assert!(matches!(
            "svm".parse::<ModelKind>(),
            Err(ScoringError::UnknownModel(name)) if name == "svm"
        ));
    }

    #[test]
    fn test_default_thresholds() {
        let rfc = ModelKind::RandomForest.default_thresholds();
        assert_eq!((rfc.low(), rfc.high()), (0.20, 0.50));
        let gbc = ModelKind::GradientBoosting.default_thresholds();
        assert_eq!((gbc.low(), gbc.high()), (0.30, 0.60));
        let lr = ModelKind::LogisticRegression.default_thresholds();
        assert_eq!((lr.low(), lr.high()), (0.50, 0.70));
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&ModelKind::RandomForest).unwrap(), "\"rfc\"");
        let kind: ModelKind = serde_json::from_str("\"gradient_boosting\"").unwrap();
        assert_eq!(kind, ModelKind::GradientBoosting);
    }
}
