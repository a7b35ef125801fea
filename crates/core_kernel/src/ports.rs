//! Model Capability Ports
//!
//! The scoring pipeline treats trained artifacts as opaque capabilities.
//! Each port describes one capability; concrete backends (JSON artifacts,
//! test stubs) implement them and are shared read-only across requests.
//!
//! ```text
//!   claim narrative ──► TextEmbedder ──► TextClassifier ──► suspicion score
//!                                                                │
//!   claim record ──► feature builder ──► TabularClassifier ◄─────┘
//!                                              │
//!                                              ▼
//!                                     fraud probability
//! ```

use crate::error::ModelError;
use crate::vector::{Embedding, NumericRow};

/// A classifier over one tabular feature row
///
/// All ports are `Send + Sync` so that one loaded artifact can serve
/// concurrent callers without locking.
pub trait TabularClassifier: Send + Sync {
    /// The input features the model was fitted on, in order
    ///
    /// `None` when the artifact does not declare them; callers then fall
    /// back to whatever columns are present.
    fn expected_features(&self) -> Option<&[String]>;

    /// Probability of the positive (fraud) class
    fn predict_proba(&self, row: &NumericRow) -> Result<f64, ModelError>;
}

/// Produces a fixed-length embedding for cleaned text
pub trait TextEmbedder: Send + Sync {
    /// Width of every embedding this embedder returns
    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Embedding, ModelError>;
}

/// Classifies a text embedding as suspicious or not
pub trait TextClassifier: Send + Sync {
    /// Probability of the suspicious class
    ///
    /// Returns `Ok(None)` when the model has no calibrated probability
    /// output; callers should then use [`TextClassifier::predict_label`].
    fn predict_proba(&self, embedding: &Embedding) -> Result<Option<f64>, ModelError>;

    /// Hard class label: `true` means suspicious
    fn predict_label(&self, embedding: &Embedding) -> Result<bool, ModelError>;
}
