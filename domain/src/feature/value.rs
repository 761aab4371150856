//! Feature value types
//!
//! Tools report scalar values of three kinds. [`FeatureValue`] is the closed
//! set of those kinds; every comparison site matches on it explicitly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single scalar value extracted by a tool or configured in a condition
///
/// # Example
///
/// ```
/// use borg_domain::FeatureValue;
///
/// let value: FeatureValue = serde_json::from_str("\"fmt/18\"").unwrap();
/// assert_eq!(value.as_str(), Some("fmt/18"));
///
/// let flag: FeatureValue = serde_json::from_str("true").unwrap();
/// assert_eq!(flag.as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl FeatureValue {
    /// Name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureValue::Bool(_) => "bool",
            FeatureValue::Number(_) => "number",
            FeatureValue::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeatureValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Bool(b) => write!(f, "{}", b),
            FeatureValue::Number(n) => write!(f, "{}", n),
            FeatureValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(s: &str) -> Self {
        FeatureValue::String(s.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(s: String) -> Self {
        FeatureValue::String(s)
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        FeatureValue::Bool(b)
    }
}

impl From<f64> for FeatureValue {
    fn from(n: f64) -> Self {
        FeatureValue::Number(n)
    }
}

/// A value extracted by one tool, with an optional human-readable label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFeatureValue {
    pub value: FeatureValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ToolFeatureValue {
    pub fn new(value: impl Into<FeatureValue>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Feature map of a single tool result, keyed by feature key
pub type Features = BTreeMap<String, ToolFeatureValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_variants() {
        let values: Vec<FeatureValue> =
            serde_json::from_str(r#"["application/pdf", false, 0.5, 3]"#).unwrap();
        assert_eq!(values[0], FeatureValue::String("application/pdf".to_string()));
        assert_eq!(values[1], FeatureValue::Bool(false));
        assert_eq!(values[2], FeatureValue::Number(0.5));
        assert_eq!(values[3], FeatureValue::Number(3.0));
    }

    #[test]
    fn test_equality_is_type_strict() {
        assert_ne!(FeatureValue::from("true"), FeatureValue::from(true));
        assert_ne!(FeatureValue::from("1"), FeatureValue::from(1.0));
    }

    #[test]
    fn test_tool_feature_value_label() {
        let json = r#"{"value": "fmt/18", "label": "Acrobat PDF 1.4"}"#;
        let parsed: ToolFeatureValue = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            ToolFeatureValue::new("fmt/18").with_label("Acrobat PDF 1.4")
        );

        let unlabeled = serde_json::to_string(&ToolFeatureValue::new(true)).unwrap();
        assert_eq!(unlabeled, r#"{"value":true}"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(FeatureValue::from("fmt/18").to_string(), "fmt/18");
        assert_eq!(FeatureValue::from(true).to_string(), "true");
        assert_eq!(FeatureValue::from(0.25).to_string(), "0.25");
    }
}
