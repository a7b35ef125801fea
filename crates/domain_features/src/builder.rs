//! Feature builder
//!
//! Produces a frame whose columns are exactly a model's expected features,
//! in order, with every cell filled. The text suspicion column is only a
//! placeholder here; the model adapter overwrites it once the narrative
//! has been scored, so text scoring happens once per claim no matter how
//! many models consume it.

use std::slice;

use serde::Serialize;
use tracing::{debug, warn};

use core_kernel::ClaimRecord;

use crate::coercion::{impute_column, ColumnKind};
use crate::engineering::{FeatureEngineering, UnseenCategory};
use crate::frame::FeatureFrame;

/// Column carrying the narrative suspicion score
pub const TEXT_SUSPICION_COLUMN: &str = "text_suspicion_score";

/// What happened while building a frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// Expected columns missing from the input and filled with defaults
    pub added: Vec<String>,
    /// Input columns the model does not expect
    pub dropped: Vec<String>,
    /// Categorical values outside the one-hot table
    pub unseen_categories: Vec<UnseenCategory>,
    /// Kind each column was imputed as, in column order
    pub column_kinds: Vec<(String, ColumnKind)>,
    /// True when the model declared no features and present columns were used
    pub used_fallback_schema: bool,
}

/// A built frame and its report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltFeatures {
    pub frame: FeatureFrame,
    pub report: BuildReport,
}

/// Builds model-ready frames from claim records
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    engineering: FeatureEngineering,
}

impl FeatureBuilder {
    pub fn new(engineering: FeatureEngineering) -> Self {
        Self { engineering }
    }

    pub fn engineering(&self) -> &FeatureEngineering {
        &self.engineering
    }

    /// Builds a single-row frame for one claim
    pub fn build(&self, claim: &ClaimRecord, expected: Option<&[String]>) -> BuiltFeatures {
        self.build_batch(slice::from_ref(claim), expected)
    }

    /// Builds one frame with a row per claim
    ///
    /// `expected` is the model's declared feature list. When it is `None`
    /// or empty, the columns present after engineering are used as-is.
    pub fn build_batch(&self, claims: &[ClaimRecord], expected: Option<&[String]>) -> BuiltFeatures {
        let mut unseen_categories = Vec::new();
        let records: Vec<ClaimRecord> = claims
            .iter()
            .map(|claim| {
                let engineered = self.engineering.apply(claim);
                unseen_categories.extend(engineered.unseen);
                engineered.record
            })
            .collect();

        let mut frame = FeatureFrame::from_records(&records);
        frame.ensure_column(TEXT_SUSPICION_COLUMN);

        let (expected, used_fallback_schema) = match expected {
            Some(features) if !features.is_empty() => (features.to_vec(), false),
            _ => {
                warn!("Model declares no expected features, using present columns");
                (frame.column_names(), true)
            }
        };

        let alignment = frame.align(&expected);
        if !alignment.added.is_empty() || !alignment.dropped.is_empty() {
            debug!(
                added = ?alignment.added,
                dropped = alignment.dropped.len(),
                "Aligned claim features to model schema"
            );
        }

        let column_kinds = frame
            .columns_mut()
            .iter_mut()
            .map(|column| {
                let kind = impute_column(column);
                (column.name().to_string(), kind)
            })
            .collect();

        BuiltFeatures {
            frame,
            report: BuildReport {
                added: alignment.added,
                dropped: alignment.dropped,
                unseen_categories,
                column_kinds,
                used_fallback_schema,
            },
        }
    }
}
