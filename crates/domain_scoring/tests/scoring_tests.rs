//! Comprehensive tests for domain_scoring

use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::{ClaimRecord, ModelError};
use domain_scoring::{
    Decision, FraudScorer, ModelKind, RiskLevel, ScoringError, ScoringMode, ThresholdPair,
};
use test_utils::{
    assert_bit_identical, assert_close, assert_risk_level, assert_valid_result,
    claim_record_strategy, fake_narrative, ArtifactFixtures, ClaimFixtures, ClaimRecordBuilder,
    ExpectedScores, FailingClassifier, FailingEmbedder, FixedClassifier, StubScorerBuilder,
    ThresholdTextClassifier,
};

fn demo() -> &'static FraudScorer {
    ArtifactFixtures::demo_scorer()
}

// ============================================================================
// End-to-End Tests Against The Demo Artifacts
// ============================================================================

mod end_to_end_tests {
    use super::*;

    #[test]
    fn test_high_fraud_preset_is_high_under_safety_net_thresholds() {
        let result = demo()
            .score_with(ModelKind::RandomForest, &ClaimFixtures::high_fraud_preset())
            .unwrap();

        assert_close(result.fraud_risk_score, ExpectedScores::HIGH_FRAUD[0], ExpectedScores::TOLERANCE);
        assert_close(result.text_suspicion_score, ExpectedScores::HIGH_FRAUD_TEXT, ExpectedScores::TOLERANCE);
        assert!(result.fraud_risk_score >= 0.5);
        assert_risk_level(&result, RiskLevel::High);
        assert_eq!(result.decision, Decision::FlaggedAsPotentialFraud);
        assert_eq!(result.threshold_used, 0.2);
    }

    #[test]
    fn test_high_fraud_preset_on_primary_path() {
        let result = demo().score(&ClaimFixtures::high_fraud_preset()).unwrap();

        assert_eq!(result.model, ModelKind::RandomForest);
        assert_risk_level(&result, RiskLevel::High);
        assert_eq!(result.threshold_used, 0.3);
    }

    #[test]
    fn test_minor_damage_claim_is_low_under_default_thresholds() {
        let claim = ClaimFixtures::minor_damage();

        let primary = demo().score(&claim).unwrap();
        assert_close(primary.fraud_risk_score, ExpectedScores::MINOR_DAMAGE[0], ExpectedScores::TOLERANCE);
        assert_close(primary.text_suspicion_score, ExpectedScores::MINOR_DAMAGE_TEXT, ExpectedScores::TOLERANCE);
        assert_risk_level(&primary, RiskLevel::Low);
        assert_eq!(primary.decision, Decision::ApproveAutomatically);

        for (position, kind) in ModelKind::ALL.into_iter().enumerate() {
            let result = demo().score_with(kind, &claim).unwrap();
            assert_close(result.fraud_risk_score, ExpectedScores::MINOR_DAMAGE[position], ExpectedScores::TOLERANCE);
            assert_risk_level(&result, RiskLevel::Low);
        }
    }

    #[test]
    fn test_per_model_scores_of_high_fraud_preset() {
        let claim = ClaimFixtures::high_fraud_preset();
        let expected_levels = [RiskLevel::High, RiskLevel::Low, RiskLevel::Medium];

        for (position, kind) in ModelKind::ALL.into_iter().enumerate() {
            let result = demo().score_with(kind, &claim).unwrap();
            assert_close(result.fraud_risk_score, ExpectedScores::HIGH_FRAUD[position], ExpectedScores::TOLERANCE);
            assert_risk_level(&result, expected_levels[position]);
            assert_eq!(result.threshold_used, kind.default_thresholds().low());
            assert_valid_result(&result);
        }
    }

    #[test]
    fn test_ensemble_takes_worst_case() {
        let outcome = demo().score_ensemble(&ClaimFixtures::high_fraud_preset()).unwrap();

        assert_eq!(outcome.members.len(), 3);
        assert_eq!(outcome.selected.model, ModelKind::RandomForest);
        assert_risk_level(&outcome.selected, RiskLevel::High);

        let minor = demo().score_ensemble(&ClaimFixtures::minor_damage()).unwrap();
        assert_eq!(minor.selected.model, ModelKind::LogisticRegression);
        assert_close(minor.selected.fraud_risk_score, ExpectedScores::MINOR_DAMAGE[2], ExpectedScores::TOLERANCE);
        assert_risk_level(&minor.selected, RiskLevel::Low);
    }

    #[test]
    fn test_smoke_check_scores_every_model() {
        let results = demo().smoke_check().unwrap();
        assert_eq!(results.len(), 3);
        for (position, result) in results.iter().enumerate() {
            assert_close(result.fraud_risk_score, ExpectedScores::SMOKE_SAMPLE[position], ExpectedScores::TOLERANCE);
            assert_close(result.text_suspicion_score, ExpectedScores::SMOKE_SAMPLE_TEXT, ExpectedScores::TOLERANCE);
        }
    }

    #[test]
    fn test_stale_derived_values_are_recomputed() {
        let honest = ClaimFixtures::smoke_sample();
        let tampered = ClaimRecordBuilder::from_smoke_sample()
            .field("claim_to_premium_ratio", 9999)
            .field("daysdiff", -1)
            .field("police_report_flag", 0)
            .build();

        let lr = ModelKind::LogisticRegression;
        assert_bit_identical(
            &demo().score_with(lr, &honest).unwrap(),
            &demo().score_with(lr, &tampered).unwrap(),
        );
    }

    #[test]
    fn test_missing_threshold_file_uses_fixed_tiers() {
        let scorer = FraudScorer::load(&ArtifactFixtures::demo_config_without_threshold()).unwrap();

        assert_eq!(scorer.global_threshold(), None);
        assert_eq!(scorer.default_profile(), ThresholdPair::new(0.2, 0.5).unwrap());

        let smoke = scorer.score(&ClaimFixtures::smoke_sample()).unwrap();
        assert_risk_level(&smoke, RiskLevel::Medium);
        assert_eq!(smoke.threshold_used, 0.2);
    }

    #[test]
    fn test_inspection_shows_model_row() {
        let inspection = demo()
            .inspect(Some(ModelKind::GradientBoosting), &ClaimFixtures::high_fraud_preset())
            .unwrap();

        let expected = ArtifactFixtures::demo_scorer()
            .registry()
            .require(ModelKind::GradientBoosting)
            .unwrap()
            .expected_features()
            .unwrap()
            .to_vec();
        assert_eq!(inspection.row.columns(), expected.as_slice());
        assert_eq!(inspection.row.get("total_claim_amount"), Some(45000.0));
        assert_close(
            inspection.row.get("text_suspicion_score").unwrap(),
            ExpectedScores::HIGH_FRAUD_TEXT,
            ExpectedScores::TOLERANCE,
        );
        assert_close(inspection.row.get("injury_ratio").unwrap(), 5000.0 / 45000.0, 1e-12);
        assert!(inspection.report.dropped.contains(&"policy_state".to_string()));
    }

    #[test]
    fn test_model_listing() {
        let models = demo().models();
        let kinds: Vec<ModelKind> = models.iter().map(|m| m.model).collect();
        assert_eq!(kinds, ModelKind::ALL.to_vec());
        assert!(models[0].primary);
        assert_eq!(models[1].thresholds, ModelKind::GradientBoosting.default_thresholds());
        assert!(models.iter().all(|m| m.expected_features.is_some()));
    }
}

// ============================================================================
// Ensemble Selector Tests
// ============================================================================

mod ensemble_tests {
    use super::*;

    #[test]
    fn test_ensemble_returns_max_of_mocked_models() {
        let scorer = StubScorerBuilder::new()
            .with_fixed(ModelKind::RandomForest, 0.1)
            .with_fixed(ModelKind::GradientBoosting, 0.6)
            .with_fixed(ModelKind::LogisticRegression, 0.3)
            .build();

        let outcome = scorer.score_ensemble(&ClaimRecord::new()).unwrap();

        assert_eq!(outcome.selected.fraud_risk_score, 0.6);
        assert_eq!(outcome.selected.model, ModelKind::GradientBoosting);
        let gbc = &outcome.members[1];
        assert_eq!(outcome.selected.decision, gbc.decision);
        assert_eq!(outcome.selected.risk_level, RiskLevel::High);
        assert_eq!(outcome.selected.threshold_used, 0.3);
    }

    #[test]
    fn test_ties_keep_first_member() {
        let pair = ThresholdPair::new(0.2, 0.5).unwrap();
        let scorer = StubScorerBuilder::new()
            .with_fixed(ModelKind::LogisticRegression, 0.4)
            .with_fixed(ModelKind::RandomForest, 0.4)
            .build_with_thresholds(pair);

        let selected = scorer.score_mode(ScoringMode::Ensemble, &ClaimRecord::new()).unwrap();
        assert_eq!(selected.model, ModelKind::LogisticRegression);
    }

    #[test]
    fn test_text_is_scored_once_and_shared() {
        let scorer = StubScorerBuilder::new()
            .with_fixed(ModelKind::RandomForest, 0.1)
            .with_fixed(ModelKind::LogisticRegression, 0.2)
            .build();
        let claim = ClaimRecordBuilder::new().narrative("Vehicle STOLEN from driveway").build();

        let outcome = scorer.score_ensemble(&claim).unwrap();
        assert!(outcome.members.iter().all(|m| m.text_suspicion_score == 0.9));
    }

    #[test]
    fn test_member_failure_fails_the_ensemble() {
        let scorer = StubScorerBuilder::new()
            .with_fixed(ModelKind::RandomForest, 0.9)
            .with_classifier(ModelKind::GradientBoosting, Arc::new(FailingClassifier::schema_mismatch()))
            .build();

        let error = scorer.score_ensemble(&ClaimRecord::new()).unwrap_err();
        assert!(matches!(
            error,
            ScoringError::Prediction { ref model, .. } if model == "gbc"
        ));
    }
}

// ============================================================================
// Text Degradation Tests
// ============================================================================

mod text_degradation_tests {
    use super::*;

    #[test]
    fn test_failing_embedder_does_not_abort_scoring() {
        let scorer = StubScorerBuilder::new()
            .with_embedder(Arc::new(FailingEmbedder))
            .with_fixed(ModelKind::RandomForest, 0.35)
            .build();
        let claim = ClaimRecordBuilder::new().narrative("stolen and need payout").build();

        let result = scorer.score(&claim).unwrap();
        assert_eq!(result.text_suspicion_score, 0.0);
        assert_eq!(result.fraud_risk_score, 0.35);
    }

    #[test]
    fn test_uncalibrated_text_model_uses_label() {
        let scorer = StubScorerBuilder::new()
            .with_text_classifier(Arc::new(ThresholdTextClassifier::uncalibrated()))
            .with_fixed(ModelKind::RandomForest, 0.1)
            .build();

        let flagged = scorer
            .score(&ClaimRecordBuilder::new().narrative("payout please").build())
            .unwrap();
        let clean = scorer
            .score(&ClaimRecordBuilder::new().narrative("fender bender").build())
            .unwrap();

        assert_eq!(flagged.text_suspicion_score, 1.0);
        assert_eq!(clean.text_suspicion_score, 0.0);
    }

    #[test]
    fn test_missing_narrative_is_exactly_zero_on_demo_artifacts() {
        let claim = ClaimRecordBuilder::from_smoke_sample().without("claim_description").build();
        for kind in ModelKind::ALL {
            assert_eq!(demo().score_with(kind, &claim).unwrap().text_suspicion_score, 0.0);
        }
    }

    #[test]
    fn test_narrative_alias_is_used() {
        let by_notes = ClaimRecordBuilder::new().field("adjuster_notes", "stolen overnight; need payout fast").build();
        let result = demo().score(&by_notes).unwrap();
        assert_close(result.text_suspicion_score, ExpectedScores::HIGH_FRAUD_TEXT, ExpectedScores::TOLERANCE);
    }
}

// ============================================================================
// Prediction Error and Batch Tests
// ============================================================================

mod prediction_error_tests {
    use super::*;

    #[test]
    fn test_prediction_error_is_surfaced_with_cause() {
        let scorer = StubScorerBuilder::new()
            .with_classifier(
                ModelKind::LogisticRegression,
                Arc::new(FailingClassifier::new(ModelError::DimensionMismatch { expected: 9, actual: 4 })),
            )
            .build();

        let error = scorer.score(&ClaimFixtures::smoke_sample()).unwrap_err();
        assert!(error.is_prediction());
        assert!(error.to_string().contains("expected 9 values, got 4"));
    }

    #[test]
    fn test_declared_features_reach_the_classifier_in_order() {
        let classifier = Arc::new(FixedClassifier::with_features(
            0.25,
            &["witnesses", "text_suspicion_score", "auto_make", "claim_to_premium_ratio"],
        ));
        let scorer = StubScorerBuilder::new()
            .with_classifier(ModelKind::GradientBoosting, classifier.clone())
            .build();

        for claim in [ClaimFixtures::empty(), ClaimFixtures::smoke_sample(), ClaimFixtures::minor_damage()] {
            assert_eq!(scorer.score(&claim).unwrap().fraud_risk_score, 0.25);
        }
        assert_eq!(classifier.calls(), 3);
    }

    #[test]
    fn test_batch_scores_each_claim_independently() {
        let claims = vec![
            ClaimFixtures::high_fraud_preset(),
            ClaimFixtures::minor_damage(),
            ClaimFixtures::empty(),
        ];

        let batch = demo().score_batch(&claims, ScoringMode::Primary).unwrap();
        assert_eq!(batch.len(), 3);
        for (claim, result) in claims.iter().zip(&batch) {
            assert_bit_identical(result, &demo().score(claim).unwrap());
        }

        let ensemble = demo().score_batch(&claims, ScoringMode::Ensemble).unwrap();
        assert_eq!(ensemble[0].model, ModelKind::RandomForest);
    }

    #[test]
    fn test_batch_fails_as_a_whole() {
        let scorer = StubScorerBuilder::new()
            .with_classifier(ModelKind::RandomForest, Arc::new(FailingClassifier::schema_mismatch()))
            .build();

        let claims = vec![ClaimFixtures::minor_damage(), ClaimFixtures::smoke_sample()];
        assert!(scorer.score_batch(&claims, ScoringMode::Primary).unwrap_err().is_prediction());
    }

    #[test]
    fn test_unbound_model_is_reported() {
        let scorer = StubScorerBuilder::new().with_fixed(ModelKind::RandomForest, 0.1).build();
        assert!(matches!(
            scorer.score_with(ModelKind::LogisticRegression, &ClaimRecord::new()),
            Err(ScoringError::ModelNotLoaded(_))
        ));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn scoring_any_claim_is_valid_and_idempotent(claim in claim_record_strategy()) {
            for kind in ModelKind::ALL {
                let first = demo().score_with(kind, &claim).unwrap();
                let second = demo().score_with(kind, &claim).unwrap();
                assert_valid_result(&first);
                assert_bit_identical(&first, &second);
            }
        }

        #[test]
        fn ensemble_is_never_below_any_member(claim in claim_record_strategy()) {
            let outcome = demo().score_ensemble(&claim).unwrap();
            for member in &outcome.members {
                prop_assert!(outcome.selected.fraud_risk_score >= member.fraud_risk_score);
            }
        }
    }

    #[test]
    fn test_random_prose_scores_cleanly() {
        for _ in 0..20 {
            let claim = ClaimRecordBuilder::from_smoke_sample().narrative(&fake_narrative()).build();
            assert_valid_result(&demo().score(&claim).unwrap());
        }
    }
}
