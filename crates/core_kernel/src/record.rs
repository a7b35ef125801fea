//! Claim records
//!
//! A claim record is an open mapping from field name to value. Callers may
//! send any subset of the claim vocabulary plus unrelated fields; nothing is
//! rejected here. Values keep the shape they arrived in and are coerced only
//! when a consumer asks for a number or text.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Field names that may carry the free-text claim narrative, in priority order
pub const NARRATIVE_KEYS: [&str; 4] = ["claim_description", "adjuster_notes", "notes", "text_all"];

/// A single value inside a claim record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null
    Null,
    /// Boolean flag
    Bool(bool),
    /// Any JSON number
    Number(f64),
    /// Free text, dates, categorical values, or numbers sent as strings
    Text(String),
    /// Arrays and objects; only their textual form is ever used
    Structured(serde_json::Value),
}

impl FieldValue {
    /// Returns true for null and for blank text
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual representation of the value, `None` when null
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(flag) => Some(Cow::Borrowed(if *flag { "true" } else { "false" })),
            FieldValue::Number(number) => Some(Cow::Owned(number.to_string())),
            FieldValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            FieldValue::Structured(value) => Some(Cow::Owned(value.to_string())),
        }
    }

    /// Lenient numeric view of the value
    ///
    /// Booleans map to 1.0/0.0 and text is parsed after trimming. Non-finite
    /// results are treated as absent.
    pub fn as_f64(&self) -> Option<f64> {
        let number = match self {
            FieldValue::Number(number) => *number,
            FieldValue::Bool(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            FieldValue::Text(text) => text.trim().parse::<f64>().ok()?,
            FieldValue::Null | FieldValue::Structured(_) => return None,
        };
        number.is_finite().then_some(number)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One insurance claim as supplied by the caller
///
/// Field iteration order is the sorted field-name order, which keeps every
/// derived structure deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ClaimRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON value, which must be an object
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        match value {
            serde_json::Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| CoreError::validation(format!("Invalid claim record: {e}"))),
            other => Err(CoreError::validation(format!(
                "Claim record must be a JSON object, got {other}"
            ))),
        }
    }

    /// Adds a field, consuming and returning the record
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Removes a field, returning its value
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Gets a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns true if the field is present (even when null)
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in name order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Numeric view of a field, `None` when absent or not a number
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    /// Trimmed text view of a field, `None` when absent or missing
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        let value = self.get(name)?;
        if value.is_missing() {
            return None;
        }
        value.to_text().map(|text| match text {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
        })
    }

    /// The first populated narrative field among [`NARRATIVE_KEYS`]
    pub fn narrative(&self) -> Option<&FieldValue> {
        NARRATIVE_KEYS
            .iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_missing())
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for ClaimRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
