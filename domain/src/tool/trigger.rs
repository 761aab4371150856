//! Tool triggers
//!
//! A validation tool only runs when the identification round suggests it is
//! relevant. Each [`Trigger`] is a conjunction of conditions; a tool fires if
//! any of its triggers fires.

use crate::core::error::DomainError;
use crate::feature::{FeatureCondition, Features};
use crate::tool::result::ToolResults;

/// Conjunction of feature conditions evaluated against available results
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    pub conditions: Vec<FeatureCondition>,
}

/// Whether a trigger fired, and the values that satisfied it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerOutcome {
    pub fired: bool,
    /// Per condition feature, the first value that satisfied it
    pub matches: Features,
}

impl TriggerOutcome {
    pub fn not_fired() -> Self {
        Self::default()
    }
}

impl Trigger {
    pub fn new(conditions: Vec<FeatureCondition>) -> Self {
        Self { conditions }
    }

    /// Evaluate the trigger against the results gathered so far.
    ///
    /// Conditions are checked in declared order; for each, the first result
    /// whose value for the condition's feature satisfies it is recorded.
    /// Evaluation stops at the first condition nobody satisfies, in which
    /// case nothing is reported as matched.
    pub fn evaluate(&self, results: &ToolResults) -> Result<TriggerOutcome, DomainError> {
        let mut matches = Features::new();
        for condition in &self.conditions {
            let mut satisfied = None;
            for result in results.values() {
                let Some(value) = result.features.get(&condition.feature) else {
                    continue;
                };
                if condition.is_fulfilled(&value.value)? {
                    satisfied = Some(value.clone());
                    break;
                }
            }
            match satisfied {
                Some(value) => {
                    matches.insert(condition.feature.clone(), value);
                }
                None => return Ok(TriggerOutcome::not_fired()),
            }
        }
        Ok(TriggerOutcome {
            fired: true,
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::ToolFeatureValue;
    use crate::tool::result::{ToolResponse, ToolResult};

    fn result_with(id: &str, features: &[(&str, ToolFeatureValue)]) -> (String, ToolResult) {
        let response = ToolResponse {
            features: features
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            ..Default::default()
        };
        (id.to_string(), ToolResult::from_response(id, id, response))
    }

    #[test]
    fn test_fires_on_matching_feature() {
        let trigger = Trigger::new(vec![FeatureCondition::pattern("f1", "^A").unwrap()]);
        let results = ToolResults::from([result_with(
            "toolX",
            &[("f1", ToolFeatureValue::new("ABC"))],
        )]);

        let outcome = trigger.evaluate(&results).unwrap();
        assert!(outcome.fired);
        assert_eq!(outcome.matches.get("f1"), Some(&ToolFeatureValue::new("ABC")));
    }

    #[test]
    fn test_does_not_fire_without_match() {
        let trigger = Trigger::new(vec![FeatureCondition::pattern("f1", "^A").unwrap()]);
        let results = ToolResults::from([result_with(
            "toolX",
            &[("f1", ToolFeatureValue::new("XYZ"))],
        )]);

        let outcome = trigger.evaluate(&results).unwrap();
        assert_eq!(outcome, TriggerOutcome::not_fired());
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_all_conditions_required_across_tools() {
        let trigger = Trigger::new(vec![
            FeatureCondition::pattern("format:puid", "^fmt/(18|19|20)$").unwrap(),
            FeatureCondition::literal("format:mimeType", "application/pdf"),
        ]);
        let results = ToolResults::from([
            result_with("droid", &[("format:puid", ToolFeatureValue::new("fmt/19"))]),
            result_with(
                "tika",
                &[("format:mimeType", ToolFeatureValue::new("application/pdf"))],
            ),
        ]);

        let outcome = trigger.evaluate(&results).unwrap();
        assert!(outcome.fired);
        assert_eq!(outcome.matches.len(), 2);

        let partial = ToolResults::from([result_with(
            "droid",
            &[("format:puid", ToolFeatureValue::new("fmt/19"))],
        )]);
        assert!(!trigger.evaluate(&partial).unwrap().fired);
    }

    #[test]
    fn test_pattern_on_bool_feature_is_error() {
        let trigger = Trigger::new(vec![
            FeatureCondition::pattern("format:valid", "true").unwrap(),
        ]);
        let results = ToolResults::from([result_with(
            "verapdf",
            &[("format:valid", ToolFeatureValue::new(true))],
        )]);
        assert!(trigger.evaluate(&results).is_err());
    }
}
