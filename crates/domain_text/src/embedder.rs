//! Text embedders
//!
//! Two embedder backends are supported, selected by the `kind` field of the
//! embedder artifact:
//!
//! - `vocabulary`: bag-of-words counts over a fixed term list
//! - `hashing`: signed feature hashing of tokens into a fixed number of buckets
//!
//! Both return L2-normalized vectors of a fixed width, so the downstream
//! text classifier sees the same dimension for every narrative.

use std::collections::HashMap;

use serde::Deserialize;

use core_kernel::{Embedding, ModelError, TextEmbedder};

use crate::error::TextError;

/// Serialized form of an embedder artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbedderSpec {
    Vocabulary { terms: Vec<String> },
    Hashing { dimension: usize },
}

/// A loaded embedder
#[derive(Debug, Clone)]
pub enum Embedder {
    Vocabulary(VocabularyEmbedder),
    Hashing(HashingEmbedder),
}

impl Embedder {
    /// Builds an embedder from its parsed artifact
    pub fn from_spec(spec: EmbedderSpec) -> Result<Self, TextError> {
        match spec {
            EmbedderSpec::Vocabulary { terms } => {
                VocabularyEmbedder::new(terms).map(Embedder::Vocabulary)
            }
            EmbedderSpec::Hashing { dimension } => {
                HashingEmbedder::new(dimension).map(Embedder::Hashing)
            }
        }
    }

    /// Parses an embedder artifact
    pub fn from_json(json: &str) -> Result<Self, TextError> {
        let spec: EmbedderSpec = serde_json::from_str(json)?;
        Self::from_spec(spec)
    }
}

impl TextEmbedder for Embedder {
    fn dimension(&self) -> usize {
        match self {
            Embedder::Vocabulary(embedder) => embedder.dimension(),
            Embedder::Hashing(embedder) => embedder.dimension(),
        }
    }

    fn embed(&self, text: &str) -> Result<Embedding, ModelError> {
        match self {
            Embedder::Vocabulary(embedder) => embedder.embed(text),
            Embedder::Hashing(embedder) => embedder.embed(text),
        }
    }
}

/// Splits cleaned text into tokens, trimming sentence periods
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|token| token.trim_matches('.'))
        .filter(|token| !token.is_empty())
}

/// Bag-of-words embedder over a fixed vocabulary
#[derive(Debug, Clone)]
pub struct VocabularyEmbedder {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl VocabularyEmbedder {
    /// Creates an embedder; terms are matched case-insensitively
    pub fn new(terms: Vec<String>) -> Result<Self, TextError> {
        if terms.is_empty() {
            return Err(TextError::invalid("vocabulary embedder needs at least one term"));
        }

        let terms: Vec<String> = terms.into_iter().map(|t| t.to_ascii_lowercase()).collect();
        let mut index = HashMap::with_capacity(terms.len());
        for (position, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), position).is_some() {
                return Err(TextError::invalid(format!("duplicate vocabulary term '{term}'")));
            }
        }

        Ok(Self { terms, index })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl TextEmbedder for VocabularyEmbedder {
    fn dimension(&self) -> usize {
        self.terms.len()
    }

    fn embed(&self, text: &str) -> Result<Embedding, ModelError> {
        let mut counts = vec![0.0; self.terms.len()];
        for token in tokens(text) {
            if let Some(&position) = self.index.get(token) {
                counts[position] += 1.0;
            }
        }
        Ok(Embedding::new(counts).normalized())
    }
}

/// Signed feature-hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Result<Self, TextError> {
        if dimension == 0 {
            return Err(TextError::invalid("hashing embedder dimension must be positive"));
        }
        Ok(Self { dimension })
    }

    // FNV-1a, stable across platforms and releases
    fn hash(token: &str) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;
        token
            .bytes()
            .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
    }
}

impl TextEmbedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Embedding, ModelError> {
        let mut buckets = vec![0.0; self.dimension];
        for token in tokens(text) {
            let hash = Self::hash(token);
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            buckets[bucket] += sign;
        }
        Ok(Embedding::new(buckets).normalized())
    }
}
