//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fraud scoring test suite.
//!
//! # Modules
//!
//! - `fixtures`: Regression claims, narratives and the demo artifact set
//! - `builders`: Builder patterns for claims and stub-backed scorers
//! - `stubs`: Test doubles for the model capability ports
//! - `assertions`: Custom assertion helpers for scoring types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod stubs;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use stubs::*;
pub use assertions::*;
pub use generators::*;
