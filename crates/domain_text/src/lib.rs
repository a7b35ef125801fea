//! Claim Narrative Domain
//!
//! This crate turns the free-text claim description into a single
//! suspicion probability that the tabular models consume as a feature.
//!
//! # Text Pipeline
//!
//! ```text
//! raw narrative -> normalize -> embed -> classify -> TextSuspicion
//! ```
//!
//! Text scoring never aborts a claim: an empty narrative yields
//! [`TextSuspicion::NoText`] and any embedding or classification failure
//! yields [`TextSuspicion::Degraded`], both of which score 0.0.

pub mod normalizer;
pub mod embedder;
pub mod classifier;
pub mod suspicion;
pub mod error;

pub use normalizer::{clean_text, normalize_field};
pub use embedder::{Embedder, EmbedderSpec, HashingEmbedder, VocabularyEmbedder};
pub use classifier::LinearTextClassifier;
pub use suspicion::{SignalSource, TextSuspicion, TextSuspicionScorer};
pub use error::TextError;
