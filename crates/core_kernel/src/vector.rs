//! Model input vectors
//!
//! `NumericRow` is the single, fully numeric row a tabular classifier sees.
//! `Embedding` is the fixed-length vector produced from claim narratives.

use serde::{Deserialize, Serialize};

/// A named, fully numeric feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl NumericRow {
    /// Creates a row; `columns` and `values` must have the same length
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ. Rows are only assembled by the feature
    /// builder, which pairs every column with exactly one value.
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Self {
        assert_eq!(
            columns.len(),
            values.len(),
            "feature row needs one value per column"
        );
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| self.values[index])
    }

    /// Pairs of (column, value) in row order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// A fixed-length text embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f64>);

impl Embedding {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero embedding of the given width
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scales the vector to unit length; zero vectors stay zero
    pub fn normalized(self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self;
        }
        Self(self.0.into_iter().map(|v| v / norm).collect())
    }
}
