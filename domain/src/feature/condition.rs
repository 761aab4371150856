//! Feature conditions
//!
//! A [`FeatureCondition`] is the single predicate shared by triggers,
//! conditional weights and identity rules: "the value of feature X matches
//! pattern P" or "the value of feature X equals V".

use super::value::FeatureValue;
use crate::core::error::DomainError;
use regex::Regex;

/// How a condition tests a feature value
#[derive(Debug, Clone)]
pub enum ValueMatcher {
    /// Regular expression applied to a string value
    Pattern(Regex),
    /// Exact equality, including the value type
    Literal(FeatureValue),
    /// Neither configured; never satisfied
    Unset,
}

/// Predicate over one feature value
///
/// # Example
///
/// ```
/// use borg_domain::{FeatureCondition, FeatureValue};
///
/// let condition = FeatureCondition::pattern("format:puid", "^fmt/(18|19)$").unwrap();
/// assert!(condition.is_fulfilled(&FeatureValue::from("fmt/18")).unwrap());
///
/// let valid = FeatureCondition::literal("format:valid", true);
/// assert!(!valid.is_fulfilled(&FeatureValue::from(false)).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct FeatureCondition {
    /// Key of the feature the condition looks at
    pub feature: String,
    pub matcher: ValueMatcher,
}

impl FeatureCondition {
    pub fn new(feature: impl Into<String>, matcher: ValueMatcher) -> Self {
        Self {
            feature: feature.into(),
            matcher,
        }
    }

    /// Create a regular expression condition
    pub fn pattern(feature: impl Into<String>, pattern: &str) -> Result<Self, DomainError> {
        Ok(Self::new(feature, ValueMatcher::Pattern(compile_pattern(pattern)?)))
    }

    /// Create a literal value condition
    pub fn literal(feature: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Self::new(feature, ValueMatcher::Literal(value.into()))
    }

    /// Test a value against this condition.
    ///
    /// A regular expression applied to a non-string value is a configuration
    /// error, not a mismatch: silently returning `false` would hide it.
    pub fn is_fulfilled(&self, value: &FeatureValue) -> Result<bool, DomainError> {
        match &self.matcher {
            ValueMatcher::Pattern(regex) => match value {
                FeatureValue::String(s) => Ok(regex.is_match(s)),
                other => Err(DomainError::TypeMismatch {
                    feature: self.feature.clone(),
                    context: "regular expression condition",
                    expected: "string",
                    found: other.type_name(),
                }),
            },
            ValueMatcher::Literal(expected) => Ok(value == expected),
            ValueMatcher::Unset => Ok(false),
        }
    }
}

/// Check that every condition holds against the features reachable through
/// `lookup`. A missing feature fails its condition.
pub fn all_conditions_hold<'a, F>(
    conditions: &[FeatureCondition],
    lookup: F,
) -> Result<bool, DomainError>
where
    F: Fn(&str) -> Option<&'a FeatureValue>,
{
    for condition in conditions {
        match lookup(&condition.feature) {
            Some(value) if condition.is_fulfilled(value)? => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

/// Compile a configured regular expression
pub fn compile_pattern(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
