//! Tests for the feature domain

use proptest::prelude::*;

use core_kernel::{ClaimRecord, FieldValue};
use domain_features::{
    columns, Cell, ColumnKind, FeatureBuilder, FeatureEngineering, OneHotField,
    TEXT_SUSPICION_COLUMN,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Bool),
        (-1.0e6..1.0e6f64).prop_map(FieldValue::Number),
        "[a-zA-Z0-9 ./-]{0,12}".prop_map(FieldValue::Text),
    ]
}

fn claim_record() -> impl Strategy<Value = ClaimRecord> {
    prop::collection::btree_map("[a-z_]{1,10}", field_value(), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

// ============================================================================
// Alignment Invariant Tests
// ============================================================================

mod alignment_tests {
    use super::*;

    proptest! {
        #[test]
        fn columns_match_expected_in_order(
            claim in claim_record(),
            expected in prop::collection::vec("[a-z_]{1,10}", 1..10),
        ) {
            let mut unique = Vec::new();
            for name in expected {
                if !unique.contains(&name) {
                    unique.push(name);
                }
            }

            let built = FeatureBuilder::default().build(&claim, Some(&unique));

            prop_assert_eq!(built.frame.column_names(), unique);
            prop_assert_eq!(built.frame.rows(), 1);
        }

        #[test]
        fn every_cell_is_filled(claim in claim_record()) {
            let built = FeatureBuilder::default().build(&claim, None);

            for column in built.frame.columns() {
                prop_assert!(column.cells().iter().all(|cell| !cell.is_empty()));
            }
            for value in built.frame.to_numeric_rows()[0].values() {
                prop_assert!(value.is_finite());
            }
        }

        #[test]
        fn building_twice_is_identical(claim in claim_record()) {
            let builder = FeatureBuilder::default();
            let expected = names(&["total_claim_amount", "auto_make", TEXT_SUSPICION_COLUMN]);
            prop_assert_eq!(
                builder.build(&claim, Some(&expected)),
                builder.build(&claim, Some(&expected))
            );
        }
    }

    #[test]
    fn test_extra_fields_never_reach_the_model() {
        let claim = ClaimRecord::new()
            .with("policy_number", 521585)
            .with("insured_hobbies", "chess")
            .with("months_as_customer", 48);
        let expected = names(&["months_as_customer"]);

        let built = FeatureBuilder::default().build(&claim, Some(&expected));

        assert_eq!(built.frame.column_names(), expected);
        assert_eq!(built.frame.to_numeric_rows()[0].values(), &[48.0]);
    }
}

// ============================================================================
// Engineering Through The Builder Tests
// ============================================================================

mod engineering_tests {
    use super::*;

    #[test]
    fn test_caller_supplied_derived_values_are_recomputed() {
        let claim = ClaimRecord::new()
            .with("total_claim_amount", 10000)
            .with("policy_annual_premium", 1000)
            .with(columns::CLAIM_TO_PREMIUM_RATIO, 999);
        let expected = names(&[columns::CLAIM_TO_PREMIUM_RATIO]);

        let built = FeatureBuilder::default().build(&claim, Some(&expected));

        assert_eq!(
            built.frame.to_numeric_rows()[0].get(columns::CLAIM_TO_PREMIUM_RATIO),
            Some(10.0)
        );
    }

    #[test]
    fn test_custom_one_hot_table() {
        let engineering =
            FeatureEngineering::with_one_hot(vec![OneHotField::new("auto_make", &["Honda", "BMW"])]);
        let builder = FeatureBuilder::new(engineering);
        let claim = ClaimRecord::new().with("auto_make", "BMW");
        let expected = names(&["auto_make_Honda", "auto_make_BMW"]);

        let built = builder.build(&claim, Some(&expected));

        assert_eq!(built.frame.to_numeric_rows()[0].values(), &[0.0, 1.0]);
        assert!(built.report.unseen_categories.is_empty());
    }

    #[test]
    fn test_mixed_batch_column_is_categorical() {
        let claims = vec![
            ClaimRecord::new().with("property_damage", "YES"),
            ClaimRecord::new().with("property_damage", 1),
            ClaimRecord::new(),
        ];
        let expected = names(&["property_damage"]);

        let built = FeatureBuilder::default().build_batch(&claims, Some(&expected));

        assert_eq!(
            built.report.column_kinds,
            vec![("property_damage".to_string(), ColumnKind::Categorical)]
        );
        assert_eq!(built.frame.column("property_damage").unwrap().cells()[2], Cell::Text("Unknown".into()));
        let rows = built.frame.to_numeric_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].values(), &[0.0]);
        assert_eq!(rows[1].values(), &[1.0]);
    }
}
