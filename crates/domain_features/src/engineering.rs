//! Derived claim features
//!
//! Every record goes through the same engineering step before alignment:
//! financial ratios, the policy-age-at-incident day count, binary flags and
//! one-hot indicators for a fixed category table. Derived columns are
//! always recomputed from their source fields, overwriting any value the
//! caller sent under the same name.
//!
//! Unseen or missing categories produce all-zero indicators for that field.
//! They are not errors; unseen values are reported back to the caller.

use serde::Serialize;
use tracing::debug;

use core_kernel::{days_between, parse_claim_date, ClaimRecord};

/// Names of the engineered columns
pub mod columns {
    pub const CLAIM_TO_PREMIUM_RATIO: &str = "claim_to_premium_ratio";
    pub const INJURY_RATIO: &str = "injury_ratio";
    pub const PROPERTY_RATIO: &str = "property_ratio";
    pub const VEHICLE_RATIO: &str = "vehicle_ratio";
    pub const DAYS_DIFF: &str = "daysdiff";
    pub const POLICE_REPORT_FLAG: &str = "police_report_flag";
    pub const PROPERTY_DAMAGE_FLAG: &str = "property_damage_flag";
    pub const AUTHORITIES_CONTACTED_FLAG: &str = "authorities_contacted_flag";
    pub const INJURY_FLAG: &str = "injury_flag";
    pub const MULTIPLE_VEHICLES_FLAG: &str = "multiple_vehicles_flag";
}

/// A categorical field encoded as one indicator column per known category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneHotField {
    pub field: String,
    pub categories: Vec<String>,
}

impl OneHotField {
    pub fn new(field: &str, categories: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Indicator column name for a category, e.g. `incident_severity_Total Loss`
    pub fn column_name(&self, category: &str) -> String {
        format!("{}_{}", self.field, category)
    }

    /// All indicator column names, in category order
    pub fn column_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| self.column_name(c)).collect()
    }
}

/// A categorical value that matched none of the known categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnseenCategory {
    pub field: String,
    pub value: String,
}

/// A record with engineered columns added
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredRecord {
    pub record: ClaimRecord,
    pub unseen: Vec<UnseenCategory>,
}

/// Feature engineering configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureEngineering {
    one_hot: Vec<OneHotField>,
}

impl Default for FeatureEngineering {
    fn default() -> Self {
        Self {
            one_hot: vec![
                OneHotField::new(
                    "incident_severity",
                    &["Major Damage", "Minor Damage", "Total Loss", "Trivial Damage"],
                ),
                OneHotField::new(
                    "incident_type",
                    &[
                        "Multi-vehicle Collision",
                        "Parked Car",
                        "Single Vehicle Collision",
                        "Vehicle Theft",
                    ],
                ),
                OneHotField::new(
                    "collision_type",
                    &["Front Collision", "Rear Collision", "Side Collision"],
                ),
                OneHotField::new("authorities_contacted", &["Ambulance", "Fire", "Other", "Police"]),
                OneHotField::new("insured_sex", &["FEMALE", "MALE"]),
                OneHotField::new("policy_csl", &["100/300", "250/500", "500/1000"]),
            ],
        }
    }
}

/// Divides, substituting 1.0 for a zero denominator
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };
    numerator / denominator
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

impl FeatureEngineering {
    /// Engineering with a custom one-hot table
    pub fn with_one_hot(one_hot: Vec<OneHotField>) -> Self {
        Self { one_hot }
    }

    pub fn one_hot_fields(&self) -> &[OneHotField] {
        &self.one_hot
    }

    /// Every column this engineering step writes
    pub fn derived_columns(&self) -> Vec<String> {
        let mut names: Vec<String> = [
            columns::CLAIM_TO_PREMIUM_RATIO,
            columns::INJURY_RATIO,
            columns::PROPERTY_RATIO,
            columns::VEHICLE_RATIO,
            columns::DAYS_DIFF,
            columns::POLICE_REPORT_FLAG,
            columns::PROPERTY_DAMAGE_FLAG,
            columns::AUTHORITIES_CONTACTED_FLAG,
            columns::INJURY_FLAG,
            columns::MULTIPLE_VEHICLES_FLAG,
        ]
        .iter()
        .map(|name| name.to_string())
        .collect();
        names.extend(self.one_hot.iter().flat_map(OneHotField::column_names));
        names
    }

    /// Returns a copy of `claim` with all engineered columns set
    pub fn apply(&self, claim: &ClaimRecord) -> EngineeredRecord {
        let mut record = claim.clone();
        let amount = |name: &str| claim.number(name).unwrap_or(0.0);

        let total = amount("total_claim_amount");
        record.insert(
            columns::CLAIM_TO_PREMIUM_RATIO,
            guarded_ratio(total, amount("policy_annual_premium")),
        );
        record.insert(columns::INJURY_RATIO, guarded_ratio(amount("injury_claim"), total));
        record.insert(columns::PROPERTY_RATIO, guarded_ratio(amount("property_claim"), total));
        record.insert(columns::VEHICLE_RATIO, guarded_ratio(amount("vehicle_claim"), total));

        let bind_date = claim.get("policy_bind_date").and_then(parse_claim_date);
        let incident_date = claim.get("incident_date").and_then(parse_claim_date);
        let days = match (bind_date, incident_date) {
            (Some(bind), Some(incident)) => days_between(bind, incident) as f64,
            _ => 0.0,
        };
        record.insert(columns::DAYS_DIFF, days);

        let is_yes = |name: &str| {
            claim
                .text(name)
                .is_some_and(|value| value.eq_ignore_ascii_case("yes"))
        };
        record.insert(columns::POLICE_REPORT_FLAG, flag(is_yes("police_report_available")));
        record.insert(columns::PROPERTY_DAMAGE_FLAG, flag(is_yes("property_damage")));
        record.insert(
            columns::AUTHORITIES_CONTACTED_FLAG,
            flag(
                claim
                    .text("authorities_contacted")
                    .is_some_and(|value| !value.eq_ignore_ascii_case("none")),
            ),
        );
        record.insert(columns::INJURY_FLAG, flag(amount("bodily_injuries") > 0.0));
        record.insert(
            columns::MULTIPLE_VEHICLES_FLAG,
            flag(amount("number_of_vehicles_involved") > 1.0),
        );

        let mut unseen = Vec::new();
        for encoding in &self.one_hot {
            let value = claim.text(&encoding.field);
            for category in &encoding.categories {
                let hit = value.as_deref() == Some(category.as_str());
                record.insert(encoding.column_name(category), flag(hit));
            }
            if let Some(value) = value {
                if !encoding.categories.iter().any(|c| c.as_str() == &*value) {
                    debug!(field = %encoding.field, value = %value, "Unseen category encoded as all zeros");
                    unseen.push(UnseenCategory {
                        field: encoding.field.clone(),
                        value: value.into_owned(),
                    });
                }
            }
        }

        EngineeredRecord { record, unseen }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineer(claim: ClaimRecord) -> EngineeredRecord {
        FeatureEngineering::default().apply(&claim)
    }

    #[test]
    fn test_ratios() {
        let out = engineer(
            ClaimRecord::new()
                .with("total_claim_amount", 15000)
                .with("policy_annual_premium", 1200.0)
                .with("injury_claim", 5000)
                .with("property_claim", "8000")
                .with("vehicle_claim", 2000),
        )
        .record;

        assert_eq!(out.number(columns::CLAIM_TO_PREMIUM_RATIO), Some(12.5));
        assert_eq!(out.number(columns::INJURY_RATIO), Some(5000.0 / 15000.0));
        assert_eq!(out.number(columns::PROPERTY_RATIO), Some(8000.0 / 15000.0));
        assert_eq!(out.number(columns::VEHICLE_RATIO), Some(2000.0 / 15000.0));
    }

    #[test]
    fn test_zero_denominator_is_replaced_by_one() {
        let out = engineer(
            ClaimRecord::new()
                .with("total_claim_amount", 45000)
                .with("policy_annual_premium", 0),
        )
        .record;
        assert_eq!(out.number(columns::CLAIM_TO_PREMIUM_RATIO), Some(45000.0));

        let out = engineer(ClaimRecord::new().with("injury_claim", 300)).record;
        assert_eq!(out.number(columns::INJURY_RATIO), Some(300.0));
    }

    #[test]
    fn test_days_diff() {
        let out = engineer(
            ClaimRecord::new()
                .with("policy_bind_date", "2018-07-15")
                .with("incident_date", "2023-02-10"),
        )
        .record;
        assert_eq!(out.number(columns::DAYS_DIFF), Some(1671.0));

        let out = engineer(
            ClaimRecord::new()
                .with("policy_bind_date", "not a date")
                .with("incident_date", "2023-02-10"),
        )
        .record;
        assert_eq!(out.number(columns::DAYS_DIFF), Some(0.0));
    }

    #[test]
    fn test_flags() {
        let out = engineer(
            ClaimRecord::new()
                .with("police_report_available", "yes")
                .with("property_damage", "?")
                .with("authorities_contacted", "Police")
                .with("bodily_injuries", 2)
                .with("number_of_vehicles_involved", 1),
        )
        .record;

        assert_eq!(out.number(columns::POLICE_REPORT_FLAG), Some(1.0));
        assert_eq!(out.number(columns::PROPERTY_DAMAGE_FLAG), Some(0.0));
        assert_eq!(out.number(columns::AUTHORITIES_CONTACTED_FLAG), Some(1.0));
        assert_eq!(out.number(columns::INJURY_FLAG), Some(1.0));
        assert_eq!(out.number(columns::MULTIPLE_VEHICLES_FLAG), Some(0.0));

        let out = engineer(ClaimRecord::new().with("authorities_contacted", "None")).record;
        assert_eq!(out.number(columns::AUTHORITIES_CONTACTED_FLAG), Some(0.0));
    }

    #[test]
    fn test_caller_supplied_derived_values_are_recomputed() {
        let out = engineer(
            ClaimRecord::new()
                .with("daysdiff", 9000)
                .with("claim_to_premium_ratio", 12.5),
        )
        .record;
        assert_eq!(out.number(columns::DAYS_DIFF), Some(0.0));
        assert_eq!(out.number(columns::CLAIM_TO_PREMIUM_RATIO), Some(0.0));
    }

    #[test]
    fn test_one_hot_known_category() {
        let out = engineer(ClaimRecord::new().with("incident_severity", " Total Loss "));

        assert!(out.unseen.is_empty());
        assert_eq!(out.record.number("incident_severity_Total Loss"), Some(1.0));
        assert_eq!(out.record.number("incident_severity_Major Damage"), Some(0.0));
        assert_eq!(out.record.number("incident_severity_Minor Damage"), Some(0.0));
        assert_eq!(out.record.number("incident_severity_Trivial Damage"), Some(0.0));
        assert_eq!(
            out.record.text("incident_severity").as_deref(),
            Some("Total Loss")
        );
    }

    #[test]
    fn test_one_hot_unseen_category_is_all_zero_and_reported() {
        let out = engineer(ClaimRecord::new().with("incident_severity", "Catastrophic"));

        let engineering = FeatureEngineering::default();
        let encoding = &engineering.one_hot_fields()[0];
        for column in encoding.column_names() {
            assert_eq!(out.record.number(&column), Some(0.0), "{column} should be 0");
        }
        assert_eq!(
            out.unseen,
            vec![UnseenCategory {
                field: "incident_severity".into(),
                value: "Catastrophic".into(),
            }]
        );
    }

    #[test]
    fn test_one_hot_matching_is_case_sensitive() {
        let out = engineer(ClaimRecord::new().with("insured_sex", "male"));
        assert_eq!(out.record.number("insured_sex_MALE"), Some(0.0));
        assert_eq!(out.unseen.len(), 1);
    }

    #[test]
    fn test_missing_category_is_all_zero_and_not_reported() {
        let out = engineer(ClaimRecord::new());
        assert_eq!(out.record.number("collision_type_Rear Collision"), Some(0.0));
        assert!(out.unseen.is_empty());
    }

    #[test]
    fn test_derived_columns_cover_everything_written() {
        let engineering = FeatureEngineering::default();
        let out = engineering.apply(&ClaimRecord::new());
        for column in engineering.derived_columns() {
            assert!(out.record.contains(&column), "{column} missing");
        }
        assert_eq!(out.record.len(), engineering.derived_columns().len());
    }
}
