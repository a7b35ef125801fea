//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for scoring types that give
//! more meaningful error messages than standard assertions.

use domain_features::BuiltFeatures;
use domain_scoring::{Decision, RiskLevel, ScoreResult};

/// Asserts that two floats differ by at most `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        (actual - expected).abs(),
        tolerance
    );
}

/// Asserts the structural invariants of any score result
///
/// # Panics
///
/// Panics if a score lies outside `[0, 1]` or the decision does not match
/// the risk level.
pub fn assert_valid_result(result: &ScoreResult) {
    assert!(
        (0.0..=1.0).contains(&result.fraud_risk_score),
        "fraud_risk_score out of range: {}",
        result.fraud_risk_score
    );
    assert!(
        (0.0..=1.0).contains(&result.text_suspicion_score),
        "text_suspicion_score out of range: {}",
        result.text_suspicion_score
    );
    assert_eq!(
        result.decision,
        Decision::from(result.risk_level),
        "Decision {} does not match risk level {:?}",
        result.decision,
        result.risk_level
    );
}

/// Asserts the risk tier of a result
pub fn assert_risk_level(result: &ScoreResult, expected: RiskLevel) {
    assert_eq!(
        result.risk_level, expected,
        "Expected {:?} risk for {} with score {} (threshold_used={})",
        expected, result.model, result.fraud_risk_score, result.threshold_used
    );
}

/// Asserts that two results are identical down to the bit pattern of every score
pub fn assert_bit_identical(a: &ScoreResult, b: &ScoreResult) {
    assert_eq!(a.fraud_risk_score.to_bits(), b.fraud_risk_score.to_bits());
    assert_eq!(a.text_suspicion_score.to_bits(), b.text_suspicion_score.to_bits());
    assert_eq!(a.threshold_used.to_bits(), b.threshold_used.to_bits());
    assert_eq!(a, b);
}

/// Asserts that a built frame has exactly `expected` columns and no empty cells
pub fn assert_aligned(built: &BuiltFeatures, expected: &[String]) {
    assert_eq!(built.frame.column_names(), expected, "Column set or order differs");
    for column in built.frame.columns() {
        assert!(
            column.cells().iter().all(|cell| !cell.is_empty()),
            "Column '{}' still has empty cells",
            column.name()
        );
    }
}
