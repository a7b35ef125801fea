//! Text domain errors

use thiserror::Error;

/// Errors raised while loading text artifacts
#[derive(Debug, Error)]
pub enum TextError {
    #[error("Invalid text artifact: {0}")]
    InvalidArtifact(String),

    #[error("Malformed text artifact JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TextError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TextError::InvalidArtifact(message.into())
    }
}
