//! Tabular Record Type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value: numeric or categorical text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric measurement (age, hours, percentages, derived ratios).
    Numeric(f64),
    /// Categorical value (gender, course, ratings).
    Text(String),
}

impl FieldValue {
    /// Numeric value, if this field holds one.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            FieldValue::Numeric(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    /// Text value, if this field holds one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Numeric(_) => None,
            FieldValue::Text(s) => Some(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Numeric(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Numeric(v as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// A single tabular record: mapping from field name to value.
///
/// Created per request and discarded after the response; never stores any
/// fitted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric value of a field, if present and numeric.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_numeric)
    }

    /// Text value of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Whether the record has a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let record = Record::new()
            .with("age", 20.0)
            .with("gender", "female");

        assert_eq!(record.numeric("age"), Some(20.0));
        assert_eq!(record.text("gender"), Some("female"));
        assert_eq!(record.numeric("gender"), None);
        assert_eq!(record.text("age"), None);
        assert!(record.get("course").is_none());
    }

    #[test]
    fn test_remove() {
        let mut record = Record::new().with("student_id", "S-001");
        assert!(record.contains("student_id"));
        assert_eq!(record.remove("student_id"), Some(FieldValue::from("S-001")));
        assert!(!record.contains("student_id"));
        assert!(record.remove("student_id").is_none());
    }

    #[test]
    fn test_json_shape() {
        let record = Record::new().with("age", 20.0).with("gender", "male");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fields"]["age"], 20.0);
        assert_eq!(json["fields"]["gender"], "male");
    }
}
