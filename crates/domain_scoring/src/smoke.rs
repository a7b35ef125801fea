//! Built-in sample claim for startup checks

use core_kernel::ClaimRecord;

/// A complete, ordinary claim covering the full field vocabulary
///
/// It also carries stale derived values (`daysdiff`, ratios, flags) as
/// callers sometimes send them; scoring recomputes those.
pub fn smoke_sample() -> ClaimRecord {
    ClaimRecord::new()
        .with("months_as_customer", 48)
        .with("age", 35)
        .with("policy_number", "12345")
        .with("policy_bind_date", "2018-07-15")
        .with("policy_state", "CA")
        .with("policy_csl", "250/500")
        .with("policy_deductable", 1000)
        .with("policy_annual_premium", 1200.0)
        .with("umbrella_limit", 0)
        .with("insured_zip", 90001)
        .with("insured_sex", "MALE")
        .with("insured_education_level", "College")
        .with("insured_occupation", "Engineer")
        .with("insured_hobbies", "reading")
        .with("insured_relationship", "husband")
        .with("capital-gains", 0)
        .with("capital-loss", 0)
        .with("incident_date", "2023-02-10")
        .with("incident_type", "Rear-End Collision")
        .with("collision_type", "Rear Collision")
        .with("incident_severity", "Major Damage")
        .with("authorities_contacted", "Police")
        .with("incident_state", "CA")
        .with("incident_city", "Los Angeles")
        .with("incident_location", "Main Street")
        .with("incident_hour_of_the_day", 14)
        .with("number_of_vehicles_involved", 2)
        .with("property_damage", "YES")
        .with("bodily_injuries", 1)
        .with("witnesses", 1)
        .with("police_report_available", "YES")
        .with("total_claim_amount", 15000)
        .with("injury_claim", 5000)
        .with("property_claim", 8000)
        .with("vehicle_claim", 2000)
        .with("auto_make", "Honda")
        .with("auto_model", "Civic")
        .with("auto_year", 2019)
        .with("claim_to_premium_ratio", 12.5)
        .with("injury_ratio", 0.33)
        .with("property_ratio", 0.53)
        .with("vehicle_ratio", 0.14)
        .with("daysdiff", 9000)
        .with("police_report_flag", 1)
        .with("property_damage_flag", 1)
        .with("authorities_contacted_flag", 1)
        .with("injury_flag", 1)
        .with("multiple_vehicles_flag", 1)
        .with(
            "claim_description",
            "Rear-end collision while stopped at a red light. Airbag deployed. Claimant reported neck pain.",
        )
}
