//! Core error types used across the scoring pipeline

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}

/// Errors raised by a model while evaluating an input
///
/// Shared by tabular classifiers, text classifiers and embedders so that
/// adapters can wrap any of them without knowing the concrete backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// Input width does not match what the model was fitted on
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },

    /// Input columns differ from the model's declared features
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// An input value was NaN or infinite
    #[error("Non-finite input in column '{column}'")]
    NonFiniteInput {
        column: String,
    },

    /// The model produced NaN or an infinite score
    #[error("Model produced a non-finite output")]
    NonFiniteOutput,

    /// The model cannot serve predictions
    #[error("Model unavailable: {0}")]
    Unavailable(String),
}

impl ModelError {
    pub fn schema(message: impl Into<String>) -> Self {
        ModelError::SchemaMismatch(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ModelError::Unavailable(message.into())
    }
}
