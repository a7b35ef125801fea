//! Feature Domain
//!
//! This crate converts open-schema claim records into the exact tabular
//! layout a trained model expects.
//!
//! # Build Steps
//!
//! ```text
//! ClaimRecord -> engineer derived features -> single-row frame
//!             -> ensure text_suspicion_score -> align to expected columns
//!             -> per-column imputation (numeric: 0, categorical: "Unknown")
//! ```
//!
//! The frame handed back still holds categorical text; the model adapter
//! performs the final all-numeric coercion right before prediction.

pub mod frame;
pub mod coercion;
pub mod engineering;
pub mod builder;

pub use frame::{AlignmentReport, Cell, Column, FeatureFrame};
pub use coercion::{impute_column, infer_kind, looks_numeric, ColumnKind, UNKNOWN_CATEGORY};
pub use engineering::{columns, EngineeredRecord, FeatureEngineering, OneHotField, UnseenCategory};
pub use builder::{BuildReport, BuiltFeatures, FeatureBuilder, TEXT_SUSPICION_COLUMN};
