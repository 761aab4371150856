//! Mergeability of feature sets
//!
//! A merge condition names a feature that two feature sets must agree on to
//! be combined. Agreement on a feature both sides have is a *strong link*;
//! a side lacking the feature neither blocks nor supports the merge.

use crate::core::error::DomainError;
use crate::feature::{FeatureValue, Features, compile_pattern};
use crate::merge::feature_set::MergedFeatures;
use regex::Regex;

/// Modifier contributed by each strong link
pub const STRONG_LINK_MODIFIER: f64 = 0.25;

/// Compatibility requirement on one feature
#[derive(Debug, Clone)]
pub struct MergeCondition {
    pub feature: String,
    /// Compare only the single capture group this expression extracts
    pub value_regex: Option<Regex>,
}

/// How a merge condition relates two feature sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeLink {
    /// Both sides have the feature and disagree
    Violated,
    /// At least one side lacks the feature
    Weak,
    /// Both sides have the feature and agree
    Strong,
}

/// Result of a mergeability check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOutcome {
    pub mergeable: bool,
    pub modifier: f64,
}

impl MergeOutcome {
    pub fn blocked() -> Self {
        Self {
            mergeable: false,
            modifier: 0.0,
        }
    }
}

impl MergeCondition {
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            value_regex: None,
        }
    }

    /// Compare values through `pattern`, which must have exactly one capture group
    pub fn with_value_regex(mut self, pattern: &str) -> Result<Self, DomainError> {
        self.value_regex = Some(compile_extraction_pattern(pattern)?);
        Ok(self)
    }

    /// Whether two conditions express the same rule
    pub fn same_rule(&self, other: &MergeCondition) -> bool {
        self.feature == other.feature
            && self.value_regex.as_ref().map(Regex::as_str)
                == other.value_regex.as_ref().map(Regex::as_str)
    }

    /// Relate the accumulated value of the feature to the candidate's value
    pub fn link(
        &self,
        accumulated: Option<&FeatureValue>,
        candidate: Option<&FeatureValue>,
    ) -> Result<MergeLink, DomainError> {
        let (Some(left), Some(right)) = (accumulated, candidate) else {
            return Ok(MergeLink::Weak);
        };
        let agree = match &self.value_regex {
            Some(regex) => {
                let left = self.string_value(left)?;
                let right = self.string_value(right)?;
                match (extract(regex, left), extract(regex, right)) {
                    (Some(l), Some(r)) => l == r,
                    _ => false,
                }
            }
            None => left == right,
        };
        Ok(if agree {
            MergeLink::Strong
        } else {
            MergeLink::Violated
        })
    }

    fn string_value<'v>(&self, value: &'v FeatureValue) -> Result<&'v str, DomainError> {
        value.as_str().ok_or_else(|| DomainError::TypeMismatch {
            feature: self.feature.clone(),
            context: "value extraction expression",
            expected: "string",
            found: value.type_name(),
        })
    }
}

/// Compile a value extraction expression, rejecting any without exactly one
/// capture group
pub fn compile_extraction_pattern(pattern: &str) -> Result<Regex, DomainError> {
    let regex = compile_pattern(pattern)?;
    // group 0 is the whole match
    let groups = regex.captures_len() - 1;
    if groups != 1 {
        return Err(DomainError::InvalidExtractionPattern {
            pattern: pattern.to_string(),
            groups,
        });
    }
    Ok(regex)
}

/// Extract the single capture group; anything else counts as no match
fn extract<'h>(regex: &Regex, haystack: &'h str) -> Option<&'h str> {
    let captures = regex.captures(haystack)?;
    if captures.len() != 2 {
        return None;
    }
    captures.get(1).map(|m| m.as_str())
}

/// Evaluate merge conditions between a coalition's merged state and a
/// candidate's features.
///
/// An empty coalition accepts anything; a candidate without features is
/// refused since it would only inflate the score. Otherwise a single violated
/// condition blocks the merge, and at least one strong link is required.
pub fn evaluate_merge<'c>(
    conditions: impl IntoIterator<Item = &'c MergeCondition>,
    accumulated: &MergedFeatures,
    candidate: &Features,
) -> Result<MergeOutcome, DomainError> {
    if accumulated.is_empty() {
        return Ok(MergeOutcome {
            mergeable: true,
            modifier: 0.0,
        });
    }
    if candidate.is_empty() {
        return Ok(MergeOutcome::blocked());
    }
    let mut modifier = 0.0;
    for condition in conditions {
        let link = condition.link(
            accumulated.get(&condition.feature).map(|v| &v.value),
            candidate.get(&condition.feature).map(|v| &v.value),
        )?;
        match link {
            MergeLink::Violated => return Ok(MergeOutcome::blocked()),
            MergeLink::Weak => {}
            MergeLink::Strong => modifier += STRONG_LINK_MODIFIER,
        }
    }
    Ok(MergeOutcome {
        mergeable: modifier > 0.0,
        modifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::ToolFeatureValue;
    use crate::merge::feature_set::FeatureSet;
    use crate::tool::FeatureSetConfig;

    fn features(pairs: &[(&str, &str)]) -> Features {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ToolFeatureValue::new(*v)))
            .collect()
    }

    fn accumulated(pairs: &[(&str, &str)]) -> MergedFeatures {
        let mut set = FeatureSet::default();
        set.add_tool("seed", &features(pairs), &FeatureSetConfig::default(), 1.0);
        set.features
    }

    #[test]
    fn test_agreement_is_strong_link() {
        let condition = MergeCondition::new("format:puid");
        let a = FeatureValue::from("fmt/18");
        let b = FeatureValue::from("fmt/18");
        assert_eq!(condition.link(Some(&a), Some(&b)).unwrap(), MergeLink::Strong);

        let outcome = evaluate_merge(
            [&condition],
            &accumulated(&[("format:puid", "fmt/18")]),
            &features(&[("format:puid", "fmt/18")]),
        )
        .unwrap();
        assert!(outcome.mergeable);
        assert_eq!(outcome.modifier, STRONG_LINK_MODIFIER);
    }

    #[test]
    fn test_disagreement_blocks_merge() {
        let condition = MergeCondition::new("format:puid");
        let outcome = evaluate_merge(
            [&condition],
            &accumulated(&[("format:puid", "fmt/18")]),
            &features(&[("format:puid", "fmt/19")]),
        )
        .unwrap();
        assert_eq!(outcome, MergeOutcome::blocked());
    }

    #[test]
    fn test_missing_feature_is_weak_link() {
        let condition = MergeCondition::new("format:puid");
        assert_eq!(
            condition.link(None, Some(&"fmt/18".into())).unwrap(),
            MergeLink::Weak
        );

        // weak links alone do not allow a merge
        let outcome = evaluate_merge(
            [&condition],
            &accumulated(&[("format:mimeType", "application/pdf")]),
            &features(&[("format:puid", "fmt/18")]),
        )
        .unwrap();
        assert!(!outcome.mergeable);
    }

    #[test]
    fn test_empty_accumulated_always_mergeable() {
        let outcome = evaluate_merge(
            [&MergeCondition::new("format:puid")],
            &MergedFeatures::new(),
            &features(&[("format:puid", "fmt/18")]),
        )
        .unwrap();
        assert!(outcome.mergeable);
        assert_eq!(outcome.modifier, 0.0);
    }

    #[test]
    fn test_featureless_candidate_refused() {
        let outcome = evaluate_merge(
            [&MergeCondition::new("format:puid")],
            &accumulated(&[("format:puid", "fmt/18")]),
            &Features::new(),
        )
        .unwrap();
        assert!(!outcome.mergeable);
    }

    #[test]
    fn test_value_regex_compares_capture_group() {
        let condition = MergeCondition::new("format:mimeType")
            .with_value_regex("^([^;]+)")
            .unwrap();
        let outcome = evaluate_merge(
            [&condition],
            &accumulated(&[("format:mimeType", "text/plain; charset=UTF-8")]),
            &features(&[("format:mimeType", "text/plain")]),
        )
        .unwrap();
        assert!(outcome.mergeable);

        // a value the expression does not match never agrees
        let text_only = MergeCondition::new("format:mimeType")
            .with_value_regex("^(text)/")
            .unwrap();
        let a = FeatureValue::from("image/png");
        assert_eq!(text_only.link(Some(&a), Some(&a)).unwrap(), MergeLink::Violated);
    }

    #[test]
    fn test_value_regex_needs_one_capture_group() {
        for (pattern, groups) in [("^text/plain", 0), ("^(text)/(plain)$", 2)] {
            let err = MergeCondition::new("format:mimeType")
                .with_value_regex(pattern)
                .unwrap_err();
            assert_eq!(
                err,
                DomainError::InvalidExtractionPattern {
                    pattern: pattern.to_string(),
                    groups,
                }
            );
        }
        // non-capturing groups do not count
        assert!(
            MergeCondition::new("format:mimeType")
                .with_value_regex("^(?:text|image)/([a-z]+)$")
                .is_ok()
        );
    }

    #[test]
    fn test_value_regex_on_non_string_is_error() {
        let condition = MergeCondition::new("format:valid")
            .with_value_regex("(.*)")
            .unwrap();
        let err = condition
            .link(Some(&true.into()), Some(&"true".into()))
            .unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_modifiers_accumulate() {
        let conditions = vec![
            MergeCondition::new("format:puid"),
            MergeCondition::new("format:mimeType"),
        ];
        let outcome = evaluate_merge(
            &conditions,
            &accumulated(&[("format:puid", "fmt/18"), ("format:mimeType", "application/pdf")]),
            &features(&[("format:puid", "fmt/18"), ("format:mimeType", "application/pdf")]),
        )
        .unwrap();
        assert_eq!(outcome.modifier, 0.5);
    }

    #[test]
    fn test_same_rule() {
        let plain = MergeCondition::new("format:puid");
        let regex = MergeCondition::new("format:puid").with_value_regex("(.*)").unwrap();
        assert!(plain.same_rule(&MergeCondition::new("format:puid")));
        assert!(!plain.same_rule(&regex));
    }
}
