//! Linear text classifier over narrative embeddings

use serde::Deserialize;

use core_kernel::{sigmoid, Embedding, ModelError, TextClassifier};

use crate::error::TextError;

fn default_calibrated() -> bool {
    true
}

/// Logistic-regression style classifier
///
/// When `calibrated` is false the artifact only supports hard labels
/// (for example a linear SVM), and [`TextClassifier::predict_proba`]
/// returns `Ok(None)`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearTextClassifier {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_calibrated")]
    calibrated: bool,
}

impl LinearTextClassifier {
    pub fn new(coefficients: Vec<f64>, intercept: f64, calibrated: bool) -> Result<Self, TextError> {
        let classifier = Self {
            coefficients,
            intercept,
            calibrated,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Parses and validates a text classifier artifact
    pub fn from_json(json: &str) -> Result<Self, TextError> {
        let classifier: Self = serde_json::from_str(json)?;
        classifier.validate()?;
        Ok(classifier)
    }

    pub fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    fn validate(&self) -> Result<(), TextError> {
        if self.coefficients.is_empty() {
            return Err(TextError::invalid("text classifier has no coefficients"));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(TextError::invalid("text classifier has non-finite parameters"));
        }
        Ok(())
    }

    fn decision(&self, embedding: &Embedding) -> Result<f64, ModelError> {
        if embedding.dimension() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: embedding.dimension(),
            });
        }

        let z = self
            .coefficients
            .iter()
            .zip(embedding.as_slice())
            .fold(self.intercept, |acc, (w, x)| acc + w * x);

        if z.is_finite() {
            Ok(z)
        } else {
            Err(ModelError::NonFiniteOutput)
        }
    }
}

impl TextClassifier for LinearTextClassifier {
    fn predict_proba(&self, embedding: &Embedding) -> Result<Option<f64>, ModelError> {
        if !self.calibrated {
            return Ok(None);
        }
        self.decision(embedding).map(|z| Some(sigmoid(z)))
    }

    fn predict_label(&self, embedding: &Embedding) -> Result<bool, ModelError> {
        self.decision(embedding).map(|z| z > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_from_decision() {
        let classifier = LinearTextClassifier::new(vec![2.0, -1.0], 0.0, true).unwrap();
        let p = classifier
            .predict_proba(&Embedding::new(vec![0.5, 1.0]))
            .unwrap()
            .unwrap();
        assert_eq!(p, 0.5);
    }

    #[test]
    fn test_uncalibrated_has_no_probability_but_labels() {
        let classifier = LinearTextClassifier::new(vec![1.0], -0.5, false).unwrap();
        let embedding = Embedding::new(vec![1.0]);

        assert_eq!(classifier.predict_proba(&embedding).unwrap(), None);
        assert!(classifier.predict_label(&embedding).unwrap());
        assert!(!classifier.predict_label(&Embedding::new(vec![0.0])).unwrap());
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let classifier = LinearTextClassifier::new(vec![1.0, 1.0], 0.0, true).unwrap();
        let result = classifier.predict_proba(&Embedding::new(vec![1.0]));
        assert_eq!(
            result,
            Err(ModelError::DimensionMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_from_json_defaults_to_calibrated() {
        let classifier =
            LinearTextClassifier::from_json(r#"{"coefficients": [0.1, 0.2], "intercept": -1.0}"#)
                .unwrap();
        assert!(classifier.is_calibrated());
        assert_eq!(classifier.dimension(), 2);

        assert!(LinearTextClassifier::from_json(r#"{"coefficients": [], "intercept": 0.0}"#).is_err());
    }
}
