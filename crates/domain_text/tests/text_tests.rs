//! Tests for the claim narrative domain

use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::{ClaimRecord, FieldValue, TextEmbedder};
use domain_text::{
    clean_text, normalize_field, Embedder, LinearTextClassifier, SignalSource, TextSuspicion,
    TextSuspicionScorer,
};

// ============================================================================
// Normalizer Tests
// ============================================================================

mod normalizer_tests {
    use super::*;

    proptest! {
        #[test]
        fn cleaned_text_uses_restricted_alphabet(raw in any::<String>()) {
            let cleaned = clean_text(&raw);
            prop_assert!(cleaned
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' || c == '.'));
            prop_assert!(!cleaned.starts_with(' '));
            prop_assert!(!cleaned.ends_with(' '));
            prop_assert!(!cleaned.contains("  "));
        }

        #[test]
        fn cleaning_is_idempotent(raw in any::<String>()) {
            let once = clean_text(&raw);
            prop_assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn test_numbers_are_cleaned_through_their_text() {
        assert_eq!(normalize_field(Some(&FieldValue::Number(-3.5))), "3.5");
    }
}

// ============================================================================
// Suspicion Scorer Tests
// ============================================================================

mod suspicion_tests {
    use super::*;

    fn scorer_from_artifacts() -> TextSuspicionScorer {
        let embedder = Embedder::from_json(
            r#"{"kind": "vocabulary", "terms": ["stolen", "payout", "fast", "scratch", "parking"]}"#,
        )
        .unwrap();
        let classifier = LinearTextClassifier::from_json(
            r#"{"coefficients": [2.0, 2.5, 1.5, -1.5, -1.0], "intercept": -1.0}"#,
        )
        .unwrap();
        assert_eq!(embedder.dimension(), classifier.dimension());
        TextSuspicionScorer::new(Arc::new(embedder), Arc::new(classifier))
    }

    #[test]
    fn test_suspicious_narrative_scores_above_benign() {
        let scorer = scorer_from_artifacts();
        let suspicious = scorer.score_claim(
            &ClaimRecord::new().with("claim_description", "Stolen overnight; need payout fast"),
        );
        let benign = scorer.score_claim(
            &ClaimRecord::new().with("claim_description", "Minor bumper scratch while parking"),
        );

        assert!(matches!(
            suspicious,
            TextSuspicion::Scored { source: SignalSource::Probability, .. }
        ));
        assert!(suspicious.score() > 0.5);
        assert!(benign.score() < 0.5);
    }

    #[test]
    fn test_missing_narrative_is_exactly_zero() {
        let scorer = scorer_from_artifacts();
        for claim in [
            ClaimRecord::new(),
            ClaimRecord::new().with("claim_description", FieldValue::Null),
            ClaimRecord::new().with("notes", "   "),
            ClaimRecord::new().with("claim_description", "!!! ;;; ---"),
        ] {
            assert_eq!(scorer.score_claim(&claim).score(), 0.0);
        }
    }

    #[test]
    fn test_hashing_embedder_against_mismatched_classifier_degrades() {
        let embedder = Embedder::from_json(r#"{"kind": "hashing", "dimension": 4}"#).unwrap();
        let classifier =
            LinearTextClassifier::from_json(r#"{"coefficients": [1.0], "intercept": 0.0}"#).unwrap();
        let scorer = TextSuspicionScorer::new(Arc::new(embedder), Arc::new(classifier));

        let outcome = scorer.assess("stolen");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.score(), 0.0);
    }
}
