//! Property-Based Test Generators
//!
//! Provides proptest strategies for claim records in every shape callers
//! send them, plus `fake`-backed narrative text.

use chrono::{Duration, NaiveDate};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;

use core_kernel::{ClaimRecord, FieldValue};

/// Field names the pipeline knows about
pub const KNOWN_FIELDS: [&str; 16] = [
    "months_as_customer",
    "age",
    "policy_annual_premium",
    "total_claim_amount",
    "injury_claim",
    "property_claim",
    "vehicle_claim",
    "bodily_injuries",
    "witnesses",
    "number_of_vehicles_involved",
    "incident_severity",
    "incident_type",
    "police_report_available",
    "property_damage",
    "authorities_contacted",
    "auto_make",
];

/// Strategy for arbitrary field values, including malformed ones
pub fn field_value_strategy() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Bool),
        (-1.0e6..1.0e6f64).prop_map(FieldValue::Number),
        (0i64..100_000).prop_map(|n| FieldValue::Text(n.to_string())),
        "[ -~]{0,16}".prop_map(FieldValue::Text),
        Just(FieldValue::Text("YES".to_string())),
        Just(FieldValue::Text("Total Loss".to_string())),
    ]
}

/// Strategy for claim-date strings in the accepted formats, or junk
pub fn claim_date_strategy() -> impl Strategy<Value = FieldValue> {
    let base = NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid base date");
    prop_oneof![
        (0i64..6000).prop_map(move |days| {
            FieldValue::Text((base + Duration::days(days)).format("%Y-%m-%d").to_string())
        }),
        (0i64..6000).prop_map(move |days| {
            FieldValue::Text((base + Duration::days(days)).format("%m/%d/%Y").to_string())
        }),
        Just(FieldValue::Text("not a date".to_string())),
        Just(FieldValue::Null),
    ]
}

/// Strategy for narratives drawn from a small, partly suspicious vocabulary
pub fn narrative_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "stolen", "payout", "fast", "minor", "scratch", "parking", "the", "car", "was", "!!", "",
        ]),
        0..10,
    )
    .prop_map(|words| words.join(" "))
}

/// Strategy for claim records mixing known fields, extra fields and narratives
pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        prop::collection::vec(
            (prop::sample::select(KNOWN_FIELDS.to_vec()), field_value_strategy()),
            0..12,
        ),
        prop::collection::btree_map("x_[a-z]{1,8}", field_value_strategy(), 0..4),
        claim_date_strategy(),
        claim_date_strategy(),
        proptest::option::of(narrative_strategy()),
    )
        .prop_map(|(known, extra, bind_date, incident_date, narrative)| {
            let mut record: ClaimRecord = known.into_iter().collect();
            for (name, value) in extra {
                record.insert(name, value);
            }
            record.insert("policy_bind_date", bind_date);
            record.insert("incident_date", incident_date);
            if let Some(text) = narrative {
                record.insert("claim_description", text);
            }
            record
        })
}

/// Strategy for probabilities in `[0, 1]`
pub fn probability_strategy() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

/// A random lorem-ipsum narrative
pub fn fake_narrative() -> String {
    Sentence(3..12).fake()
}
