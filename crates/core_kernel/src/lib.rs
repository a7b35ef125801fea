//! Core Kernel - Foundational types for claim fraud scoring
//!
//! This crate provides the building blocks shared by every scoring component:
//! - Claim records with an open field set and tolerant value coercion
//! - Claim date parsing used by feature engineering
//! - Numeric feature rows and text embeddings handed to models
//! - Capability ports implemented by tabular and text models

pub mod record;
pub mod temporal;
pub mod vector;
pub mod ports;
pub mod error;

pub use record::{ClaimRecord, FieldValue, NARRATIVE_KEYS};
pub use temporal::{days_between, parse_claim_date};
pub use vector::{sigmoid, Embedding, NumericRow};
pub use ports::{TabularClassifier, TextClassifier, TextEmbedder};
pub use error::{CoreError, ModelError};
