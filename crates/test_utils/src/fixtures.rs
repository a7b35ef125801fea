//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claims, narratives and artifact locations. The
//! claims are regression fixtures: their scores against the demo artifacts
//! under `models/` are pinned by the end-to-end tests.

use std::path::PathBuf;

use once_cell::sync::Lazy;

use core_kernel::ClaimRecord;
use domain_scoring::{smoke_sample, FraudScorer, ScoringConfig};

/// Fixture for claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// The ordinary, complete claim used by the startup smoke check
    pub fn smoke_sample() -> ClaimRecord {
        smoke_sample()
    }

    /// Smoke sample turned into a high-fraud preset
    ///
    /// Large total-loss claim from a brand-new customer with a narrative
    /// asking for a fast payout.
    pub fn high_fraud_preset() -> ClaimRecord {
        let mut claim = smoke_sample();
        claim.insert("months_as_customer", 1);
        claim.insert("total_claim_amount", 45000);
        claim.insert("incident_severity", "Total Loss");
        claim.insert("claim_description", NarrativeFixtures::suspicious());
        claim
    }

    /// Small minor-damage claim with only three fields
    pub fn minor_damage() -> ClaimRecord {
        ClaimRecord::new()
            .with("total_claim_amount", 1200)
            .with("incident_severity", "Minor Damage")
            .with("claim_description", NarrativeFixtures::benign())
    }

    /// A record with no fields at all
    pub fn empty() -> ClaimRecord {
        ClaimRecord::new()
    }
}

/// Fixture for claim narratives
pub struct NarrativeFixtures;

impl NarrativeFixtures {
    pub fn suspicious() -> &'static str {
        "stolen overnight; need payout fast"
    }

    pub fn benign() -> &'static str {
        "Minor bumper scratch while parking"
    }

    /// Text that cleans to nothing
    pub fn punctuation_only() -> &'static str {
        "!!! ;;; ---"
    }
}

static DEMO_SCORER: Lazy<FraudScorer> = Lazy::new(|| {
    FraudScorer::load(&ArtifactFixtures::demo_config()).expect("demo artifacts load")
});

/// Fixture for the demo model artifacts
pub struct ArtifactFixtures;

impl ArtifactFixtures {
    /// The workspace `models/` directory
    pub fn demo_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models")
    }

    /// Default configuration pointing at the demo artifacts
    pub fn demo_config() -> ScoringConfig {
        ScoringConfig::with_artifact_dir(Self::demo_dir())
    }

    /// Demo configuration without a threshold file
    pub fn demo_config_without_threshold() -> ScoringConfig {
        let mut config = Self::demo_config();
        config.files.threshold = "absent-threshold.txt".to_string();
        config
    }

    /// A scorer over the demo artifacts, loaded once per test binary
    pub fn demo_scorer() -> &'static FraudScorer {
        &DEMO_SCORER
    }
}

/// Demo-artifact scores of the fixtures, one entry per model (rfc, gbc, lr)
pub struct ExpectedScores;

impl ExpectedScores {
    pub const HIGH_FRAUD: [f64; 3] = [0.6875, 0.278_884_8, 0.565_816_7];
    pub const HIGH_FRAUD_TEXT: f64 = 0.937_026_6;

    pub const MINOR_DAMAGE: [f64; 3] = [0.0625, 0.099_750_5, 0.194_222_1];
    pub const MINOR_DAMAGE_TEXT: f64 = 0.026_597_0;

    pub const SMOKE_SAMPLE: [f64; 3] = [0.245, 0.062_973_4, 0.051_495_2];
    pub const SMOKE_SAMPLE_TEXT: f64 = 0.183_176_2;

    /// Tolerance for the rounded constants above
    pub const TOLERANCE: f64 = 1e-6;
}
