//! Threshold Policy
//!
//! Maps a fraud probability to a risk tier and a recommended action.
//!
//! ```text
//!   0.0 ────────── low ────────── high ────────── 1.0
//!        Low             Medium           High
//!   Approve          Manual Review     Flagged as
//!   Automatically      Required      Potential Fraud
//! ```
//!
//! A probability equal to a cutoff falls into the higher tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Global threshold used when no threshold file is supplied
pub const DEFAULT_GLOBAL_THRESHOLD: f64 = 0.2;

/// Floor for the high cutoff of the default profile
pub const DEFAULT_HIGH_CUTOFF: f64 = 0.5;

/// Discrete risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Recommended action for a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Approve Automatically")]
    ApproveAutomatically,
    #[serde(rename = "Manual Review Required")]
    ManualReviewRequired,
    #[serde(rename = "Flagged as Potential Fraud")]
    FlaggedAsPotentialFraud,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::ApproveAutomatically => "Approve Automatically",
            Decision::ManualReviewRequired => "Manual Review Required",
            Decision::FlaggedAsPotentialFraud => "Flagged as Potential Fraud",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RiskLevel> for Decision {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Decision::ApproveAutomatically,
            RiskLevel::Medium => Decision::ManualReviewRequired,
            RiskLevel::High => Decision::FlaggedAsPotentialFraud,
        }
    }
}

/// Classifies a probability against a low and a high cutoff
pub fn classify(probability: f64, low: f64, high: f64) -> (RiskLevel, Decision) {
    let level = if probability < low {
        RiskLevel::Low
    } else if probability < high {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };
    (level, Decision::from(level))
}

#[derive(Deserialize)]
struct RawThresholds {
    low: f64,
    high: f64,
}

/// A validated low/high cutoff pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct ThresholdPair {
    low: f64,
    high: f64,
}

impl ThresholdPair {
    /// Creates a pair with `0 <= low <= high <= 1`
    pub fn new(low: f64, high: f64) -> Result<Self, ScoringError> {
        if !(low.is_finite() && high.is_finite()) {
            return Err(ScoringError::InvalidThresholds(format!(
                "cutoffs must be finite, got ({low}, {high})"
            )));
        }
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) {
            return Err(ScoringError::InvalidThresholds(format!(
                "cutoffs must lie in [0, 1], got ({low}, {high})"
            )));
        }
        if low > high {
            return Err(ScoringError::InvalidThresholds(format!(
                "low cutoff {low} exceeds high cutoff {high}"
            )));
        }
        Ok(Self { low, high })
    }

    /// Pair from known-good constants
    pub(crate) const fn from_constants(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Profile for the primary single-model path
    ///
    /// `(global, max(0.5, global))`, with `global` defaulting to 0.2 when
    /// no threshold file was supplied. `global` must already lie in `[0, 1]`.
    pub fn default_profile(global: Option<f64>) -> Self {
        let low = global.unwrap_or(DEFAULT_GLOBAL_THRESHOLD);
        Self {
            low,
            high: low.max(DEFAULT_HIGH_CUTOFF),
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn classify(&self, probability: f64) -> (RiskLevel, Decision) {
        classify(probability, self.low, self.high)
    }
}

impl TryFrom<RawThresholds> for ThresholdPair {
    type Error = ScoringError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        ThresholdPair::new(raw.low, raw.high)
    }
}
