//! Tool configuration from the `tools` list
//!
//! Example configuration:
//!
//! ```yaml
//! tools:
//!   - id: droid
//!     title: DROID
//!     endpoint: http://localhost:8081/identify
//!     featureSet:
//!       features:
//!         - key: format:puid
//!           mergeOrder: 1
//!           mergeCondition: { exactMatch: true }
//!       weight:
//!         default: 0.6
//!   - id: jhove
//!     title: JHOVE
//!     endpoint: http://localhost:8082/validate
//!     triggers:
//!       - conditions:
//!           - { feature: "format:puid", regEx: "^fmt/(95|354|476|477|478)$" }
//!     featureSet:
//!       features:
//!         - { key: "format:puid", providedByTrigger: true }
//!         - { key: "format:valid", mergeOrder: 2 }
//!       weight:
//!         default: 0.5
//!         conditional:
//!           - value: 1.0
//!             conditions: [{ feature: "format:valid", value: true }]
//! ```

use borg_domain::{
    ConditionalWeight, DomainError, FeatureCondition, FeatureConfig, FeatureSetConfig,
    FeatureValue, MergeCondition, ToolConfig, Trigger, ValueMatcher, Weight,
    feature::compile_pattern,
};
use serde::{Deserialize, Serialize};

/// A feature condition as written in the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConditionConfig {
    pub feature: String,
    #[serde(rename = "regEx", default, skip_serializing_if = "Option::is_none")]
    pub reg_ex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FeatureValue>,
}

impl FileConditionConfig {
    pub fn to_condition(&self) -> Result<FeatureCondition, DomainError> {
        let matcher = match (&self.reg_ex, &self.value) {
            (Some(pattern), _) => ValueMatcher::Pattern(compile_pattern(pattern)?),
            (None, Some(value)) => ValueMatcher::Literal(value.clone()),
            (None, None) => ValueMatcher::Unset,
        };
        Ok(FeatureCondition::new(&self.feature, matcher))
    }
}

/// Convert a list of raw conditions
pub fn to_conditions(raw: &[FileConditionConfig]) -> Result<Vec<FeatureCondition>, DomainError> {
    raw.iter().map(FileConditionConfig::to_condition).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTriggerConfig {
    pub conditions: Vec<FileConditionConfig>,
}

/// Merge condition attached to a declared feature
///
/// It takes effect with `exactMatch: true` or a `valueRegEx`; anything else
/// declares no condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileFeatureMergeCondition {
    pub exact_match: bool,
    #[serde(rename = "valueRegEx", skip_serializing_if = "Option::is_none")]
    pub value_regex: Option<String>,
}

impl FileFeatureMergeCondition {
    pub fn is_active(&self) -> bool {
        self.exact_match || self.value_regex.is_some()
    }
}

/// Merge condition listed on the feature set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMergeConditionConfig {
    pub feature: String,
    #[serde(rename = "valueRegEx", default, skip_serializing_if = "Option::is_none")]
    pub value_regex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileFeatureConfig {
    pub key: String,
    pub merge_order: u32,
    pub provided_by_trigger: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_condition: Option<FileFeatureMergeCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConditionalWeight {
    pub value: f64,
    pub conditions: Vec<FileConditionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileWeightConfig {
    pub default: f64,
    pub conditional: Vec<FileConditionalWeight>,
    pub provided_by_tool: bool,
}

impl Default for FileWeightConfig {
    fn default() -> Self {
        Self {
            default: 1.0,
            conditional: Vec::new(),
            provided_by_tool: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileFeatureSetConfig {
    pub features: Vec<FileFeatureConfig>,
    pub weight: FileWeightConfig,
    pub merge_conditions: Vec<FileMergeConditionConfig>,
}

impl FileFeatureSetConfig {
    pub fn declares(&self, key: &str) -> bool {
        self.features.iter().any(|f| f.key == key)
    }

    /// Per-feature and feature-set merge conditions, in that order
    pub fn raw_merge_conditions(&self) -> Vec<(&str, Option<&str>)> {
        let per_feature = self.features.iter().filter_map(|f| {
            f.merge_condition
                .as_ref()
                .filter(|c| c.is_active())
                .map(|c| (f.key.as_str(), c.value_regex.as_deref()))
        });
        let listed = self
            .merge_conditions
            .iter()
            .map(|c| (c.feature.as_str(), c.value_regex.as_deref()));
        per_feature.chain(listed).collect()
    }

    fn to_domain(&self) -> Result<FeatureSetConfig, DomainError> {
        let features = self
            .features
            .iter()
            .map(|f| FeatureConfig {
                key: f.key.clone(),
                merge_order: f.merge_order,
                provided_by_trigger: f.provided_by_trigger,
            })
            .collect();

        let mut weight = Weight::fixed(self.weight.default);
        weight.provided_by_tool = self.weight.provided_by_tool;
        for conditional in &self.weight.conditional {
            weight = weight.with_conditional(ConditionalWeight::new(
                conditional.value,
                to_conditions(&conditional.conditions)?,
            ));
        }

        let mut merge_conditions: Vec<MergeCondition> = Vec::new();
        for (feature, value_regex) in self.raw_merge_conditions() {
            let condition = match value_regex {
                Some(pattern) => MergeCondition::new(feature).with_value_regex(pattern)?,
                None => MergeCondition::new(feature),
            };
            if !merge_conditions.iter().any(|c| c.same_rule(&condition)) {
                merge_conditions.push(condition);
            }
        }

        Ok(FeatureSetConfig {
            features,
            weight,
            merge_conditions,
        })
    }
}

fn default_enabled() -> bool {
    true
}

/// One external tool as written in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileToolConfig {
    pub id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Defaults to the id
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub triggers: Vec<FileTriggerConfig>,
    #[serde(default)]
    pub feature_set: FileFeatureSetConfig,
}

impl FileToolConfig {
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            title: String::new(),
            endpoint: endpoint.into(),
            triggers: Vec::new(),
            feature_set: FileFeatureSetConfig::default(),
        }
    }

    /// Every condition of the tool, for validation
    pub fn all_conditions(&self) -> impl Iterator<Item = &FileConditionConfig> {
        self.triggers
            .iter()
            .flat_map(|t| t.conditions.iter())
            .chain(
                self.feature_set
                    .weight
                    .conditional
                    .iter()
                    .flat_map(|w| w.conditions.iter()),
            )
    }

    /// Compile into the immutable domain configuration
    pub fn to_domain(&self) -> Result<ToolConfig, DomainError> {
        let title = if self.title.is_empty() {
            self.id.clone()
        } else {
            self.title.clone()
        };
        let mut tool = ToolConfig::new(&self.id, &self.endpoint)
            .with_title(title)
            .with_feature_set(self.feature_set.to_domain()?);
        tool.enabled = self.enabled;
        for trigger in &self.triggers {
            tool = tool.with_trigger(Trigger::new(to_conditions(&trigger.conditions)?));
        }
        Ok(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borg_domain::InvocationRound;
    use figment::{
        Figment,
        providers::{Format, Yaml},
    };

    fn parse(yaml: &str) -> FileToolConfig {
        Figment::from(Yaml::string(yaml)).extract().unwrap()
    }

    #[test]
    fn test_deserialize_triggered_tool() {
        let raw = parse(
            r#"
id: jhove
title: JHOVE
endpoint: http://localhost:8082/validate
triggers:
  - conditions:
      - feature: format:puid
        regEx: "^fmt/(95|354)$"
featureSet:
  features:
    - key: format:puid
      providedByTrigger: true
    - key: format:valid
      mergeOrder: 2
  weight:
    default: 0.5
    conditional:
      - value: 1.0
        conditions:
          - feature: format:valid
            value: true
"#,
        );
        assert!(raw.enabled);
        assert_eq!(raw.triggers[0].conditions[0].reg_ex.as_deref(), Some("^fmt/(95|354)$"));
        assert_eq!(
            raw.feature_set.weight.conditional[0].conditions[0].value,
            Some(FeatureValue::Bool(true))
        );

        let tool = raw.to_domain().unwrap();
        assert_eq!(tool.round(), InvocationRound::Triggered);
        assert!(tool.feature_set.features[0].provided_by_trigger);
        assert_eq!(tool.feature_set.merge_order("format:valid"), 2);
        assert_eq!(tool.feature_set.weight.default, 0.5);
        assert_eq!(tool.feature_set.weight.conditional.len(), 1);
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let raw = parse("id: droid\nendpoint: http://droid\n");
        assert_eq!(raw.feature_set.weight.default, 1.0);
        let tool = raw.to_domain().unwrap();
        assert_eq!(tool.title, "droid");
        assert_eq!(tool.round(), InvocationRound::Identification);
    }

    #[test]
    fn test_both_merge_condition_forms() {
        let raw = parse(
            r#"
id: tika
endpoint: http://tika
featureSet:
  features:
    - key: format:mimeType
      mergeCondition:
        valueRegEx: "^([^;]+)"
    - key: format:puid
      mergeCondition:
        exactMatch: true
  mergeConditions:
    - feature: format:puid
"#,
        );
        let tool = raw.to_domain().unwrap();
        let conditions = &tool.feature_set.merge_conditions;
        // the listed puid condition repeats the per-feature one
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].feature, "format:mimeType");
        assert!(conditions[0].value_regex.is_some());
        assert_eq!(conditions[1].feature, "format:puid");
    }

    #[test]
    fn test_inactive_merge_condition_is_skipped() {
        let raw = parse(
            r#"
id: siegfried
endpoint: http://siegfried
featureSet:
  features:
    - key: format:puid
      mergeCondition:
        exactMatch: false
    - key: format:mimeType
      mergeCondition: {}
"#,
        );
        assert!(raw.feature_set.raw_merge_conditions().is_empty());
        let tool = raw.to_domain().unwrap();
        assert!(tool.feature_set.merge_conditions.is_empty());
    }

    #[test]
    fn test_extraction_pattern_without_group_fails_conversion() {
        let raw = parse(
            r#"
id: tika
endpoint: http://tika
featureSet:
  features:
    - key: format:mimeType
      mergeCondition:
        valueRegEx: "^text/plain"
"#,
        );
        assert!(matches!(
            raw.to_domain(),
            Err(DomainError::InvalidExtractionPattern { groups: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_fails_conversion() {
        let mut raw = FileToolConfig::new("droid", "http://droid");
        raw.triggers.push(FileTriggerConfig {
            conditions: vec![FileConditionConfig {
                feature: "format:puid".to_string(),
                reg_ex: Some("fmt/(".to_string()),
                value: None,
            }],
        });
        assert!(matches!(
            raw.to_domain(),
            Err(DomainError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_condition_without_matcher_is_unset() {
        let raw = FileConditionConfig {
            feature: "format:valid".to_string(),
            ..Default::default()
        };
        let condition = raw.to_condition().unwrap();
        assert!(matches!(condition.matcher, ValueMatcher::Unset));
    }
}
