//! Static tool configuration
//!
//! Built once at startup from the configuration file and never mutated.

use crate::analysis::round::InvocationRound;
use crate::core::error::DomainError;
use crate::feature::Features;
use crate::merge::condition::{MergeCondition, MergeOutcome, evaluate_merge};
use crate::merge::feature_set::MergedFeatures;
use crate::tool::result::{ToolResult, ToolResults};
use crate::tool::trigger::{Trigger, TriggerOutcome};
use crate::tool::weight::Weight;

/// Declaration of one feature a tool can contribute
#[derive(Debug, Clone, Default)]
pub struct FeatureConfig {
    pub key: String,
    /// Priority when coalition members disagree on this feature
    pub merge_order: u32,
    /// Value is copied from the trigger match rather than the tool output
    pub provided_by_trigger: bool,
}

impl FeatureConfig {
    pub fn new(key: impl Into<String>, merge_order: u32) -> Self {
        Self {
            key: key.into(),
            merge_order,
            provided_by_trigger: false,
        }
    }

    pub fn provided_by_trigger(mut self) -> Self {
        self.provided_by_trigger = true;
        self
    }
}

/// What a tool contributes to merged feature sets and how
#[derive(Debug, Clone, Default)]
pub struct FeatureSetConfig {
    pub features: Vec<FeatureConfig>,
    pub weight: Weight,
    pub merge_conditions: Vec<MergeCondition>,
}

impl FeatureSetConfig {
    pub fn feature(&self, key: &str) -> Option<&FeatureConfig> {
        self.features.iter().find(|f| f.key == key)
    }

    /// Merge order of a feature; undeclared features have the lowest priority
    pub fn merge_order(&self, key: &str) -> u32 {
        self.feature(key).map(|f| f.merge_order).unwrap_or(0)
    }

    /// Check whether `candidate` may join a coalition whose merged state is
    /// `accumulated`, judged by this tool's own merge conditions
    pub fn are_mergeable(
        &self,
        accumulated: &MergedFeatures,
        candidate: &Features,
    ) -> Result<MergeOutcome, DomainError> {
        evaluate_merge(&self.merge_conditions, accumulated, candidate)
    }

    /// Pick the features this tool takes from a trigger match
    pub fn trigger_provided(&self, matches: &Features) -> Features {
        self.features
            .iter()
            .filter(|f| f.provided_by_trigger)
            .filter_map(|f| matches.get(&f.key).map(|v| (f.key.clone(), v.clone())))
            .collect()
    }
}

/// Configuration of one external tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub id: String,
    pub title: String,
    pub enabled: bool,
    pub endpoint: String,
    /// Empty means the tool runs in the identification round
    pub triggers: Vec<Trigger>,
    pub feature_set: FeatureSetConfig,
}

impl ToolConfig {
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            enabled: true,
            endpoint: endpoint.into(),
            triggers: Vec::new(),
            feature_set: FeatureSetConfig::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn with_feature_set(mut self, feature_set: FeatureSetConfig) -> Self {
        self.feature_set = feature_set;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The round this tool is dispatched in
    pub fn round(&self) -> InvocationRound {
        if self.triggers.is_empty() {
            InvocationRound::Identification
        } else {
            InvocationRound::Triggered
        }
    }

    /// Evaluate the triggers in declared order; the first that fires wins and
    /// only its matches are reported
    pub fn is_triggered(&self, results: &ToolResults) -> Result<TriggerOutcome, DomainError> {
        for trigger in &self.triggers {
            let outcome = trigger.evaluate(results)?;
            if outcome.fired {
                return Ok(outcome);
            }
        }
        Ok(TriggerOutcome::not_fired())
    }

    /// Weight of a result produced by this tool
    pub fn weight_of(&self, result: &ToolResult) -> Result<f64, DomainError> {
        self.feature_set.weight.resolve(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureCondition, ToolFeatureValue};
    use crate::tool::result::ToolResponse;

    fn identification_results(puid: &str) -> ToolResults {
        let response = ToolResponse {
            features: Features::from([(
                "format:puid".to_string(),
                ToolFeatureValue::new(puid).with_label("PDF 1.4"),
            )]),
            ..Default::default()
        };
        ToolResults::from([(
            "droid".to_string(),
            ToolResult::from_response("droid", "DROID", response),
        )])
    }

    fn verapdf() -> ToolConfig {
        ToolConfig::new("verapdf", "http://verapdf/validate")
            .with_trigger(Trigger::new(vec![
                FeatureCondition::pattern("format:puid", "^fmt/95$").unwrap(),
            ]))
            .with_trigger(Trigger::new(vec![
                FeatureCondition::pattern("format:puid", "^fmt/(18|19|20)$").unwrap(),
            ]))
    }

    #[test]
    fn test_round() {
        assert_eq!(
            ToolConfig::new("droid", "http://droid").round(),
            InvocationRound::Identification
        );
        assert_eq!(verapdf().round(), InvocationRound::Triggered);
    }

    #[test]
    fn test_any_trigger_fires() {
        let outcome = verapdf().is_triggered(&identification_results("fmt/19")).unwrap();
        assert!(outcome.fired);
        assert_eq!(
            outcome.matches["format:puid"].value,
            crate::FeatureValue::from("fmt/19")
        );

        let outcome = verapdf().is_triggered(&identification_results("fmt/43")).unwrap();
        assert!(!outcome.fired);
    }

    #[test]
    fn test_untriggered_tool_never_fires() {
        let droid = ToolConfig::new("droid", "http://droid");
        assert!(!droid.is_triggered(&identification_results("fmt/19")).unwrap().fired);
    }

    #[test]
    fn test_trigger_provided_features() {
        let config = FeatureSetConfig {
            features: vec![
                FeatureConfig::new("format:puid", 1).provided_by_trigger(),
                FeatureConfig::new("format:valid", 2),
            ],
            ..Default::default()
        };
        let matches = Features::from([
            ("format:puid".to_string(), ToolFeatureValue::new("fmt/19")),
            ("format:mimeType".to_string(), ToolFeatureValue::new("application/pdf")),
        ]);
        let provided = config.trigger_provided(&matches);
        assert_eq!(provided.len(), 1);
        assert!(provided.contains_key("format:puid"));
    }

    #[test]
    fn test_merge_order_defaults_to_zero() {
        let config = FeatureSetConfig {
            features: vec![FeatureConfig::new("format:version", 5)],
            ..Default::default()
        };
        assert_eq!(config.merge_order("format:version"), 5);
        assert_eq!(config.merge_order("format:name"), 0);
    }
}
