//! Ensemble Selector
//!
//! Runs every bound model over the same claim and keeps the single
//! highest-risk result. This is a worst-case policy, not an average: if
//! any model flags a claim, the ensemble output reflects it.

use serde::Serialize;
use tracing::info;

use core_kernel::ClaimRecord;
use domain_text::TextSuspicionScorer;

use crate::adapter::ModelAdapter;
use crate::error::ScoringError;
use crate::result::ScoreResult;

/// The selected result plus every member's result, in member order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleOutcome {
    pub selected: ScoreResult,
    pub members: Vec<ScoreResult>,
}

/// Picks the result with the highest fraud score; the first one wins ties
pub fn select_highest(results: &[ScoreResult]) -> Option<&ScoreResult> {
    results.iter().fold(None, |best, candidate| match best {
        Some(current) if current.fraud_risk_score >= candidate.fraud_risk_score => Some(current),
        _ => Some(candidate),
    })
}

/// Max-risk selector over a fixed set of model adapters
#[derive(Debug, Clone)]
pub struct EnsembleSelector {
    members: Vec<ModelAdapter>,
    text: TextSuspicionScorer,
}

impl EnsembleSelector {
    /// Creates a selector; the narrative is scored once with `text`
    pub fn new(members: Vec<ModelAdapter>, text: TextSuspicionScorer) -> Result<Self, ScoringError> {
        if members.is_empty() {
            return Err(ScoringError::configuration("ensemble needs at least one model"));
        }
        Ok(Self { members, text })
    }

    pub fn members(&self) -> &[ModelAdapter] {
        &self.members
    }

    /// Scores with every member and returns all results
    ///
    /// Fails on the first member prediction error.
    pub fn evaluate(&self, claim: &ClaimRecord) -> Result<EnsembleOutcome, ScoringError> {
        let text = self.text.score_claim(claim);
        let members = self
            .members
            .iter()
            .map(|adapter| adapter.score_with_text(claim, &text))
            .collect::<Result<Vec<_>, _>>()?;

        let selected = select_highest(&members)
            .cloned()
            .ok_or_else(|| ScoringError::configuration("ensemble produced no results"))?;

        info!(
            model = %selected.model,
            score = selected.fraud_risk_score,
            risk_level = ?selected.risk_level,
            "Ensemble selected highest-risk result"
        );

        Ok(EnsembleOutcome { selected, members })
    }

    /// The highest-risk result only
    pub fn score(&self, claim: &ClaimRecord) -> Result<ScoreResult, ScoringError> {
        self.evaluate(claim).map(|outcome| outcome.selected)
    }
}
