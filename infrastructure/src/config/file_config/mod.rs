//! Raw configuration data types
//!
//! These structs represent the exact structure of the YAML (or TOML) config
//! file. They are deserialized directly, validated as a whole, and then
//! compiled into the immutable domain [`ServerConfig`].

mod server;
mod tools;

pub use server::FileServerConfig;
pub use tools::{
    FileConditionConfig, FileConditionalWeight, FileFeatureConfig, FileFeatureMergeCondition,
    FileFeatureSetConfig, FileMergeConditionConfig, FileToolConfig, FileTriggerConfig,
    FileWeightConfig, to_conditions,
};

use borg_domain::{
    ConfigIssue, ConfigIssueCode, DomainError, FileIdentityRule, ServerConfig,
    feature::compile_pattern, merge::compile_extraction_pattern,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity rule as written in the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityRuleConfig {
    pub conditions: Vec<FileConditionConfig>,
}

/// Complete file configuration (raw structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    /// Server settings
    pub server: FileServerConfig,
    /// Tools in declaration order
    pub tools: Vec<FileToolConfig>,
    /// Identity rules overriding the ranking
    pub file_identity: Vec<FileIdentityRuleConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Tool identity: duplicate ids, empty endpoints, nothing enabled
    /// 2. Triggers and conditions: empty triggers, ambiguous or ineffective
    ///    conditions, regular expressions that do not compile
    /// 3. Feature sets: trigger-provided features without triggers, negative
    ///    weights, merge conditions on undeclared features
    /// 4. Identity rules without conditions
    /// 5. Server settings
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Tool identity
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.id.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateToolId,
                    format!("tool '{}' is declared more than once", tool.id),
                ));
            }
            if tool.enabled && tool.endpoint.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyEndpoint,
                    format!("tool '{}' has no endpoint", tool.id),
                ));
            }
        }
        if !self.tools.iter().any(|t| t.enabled) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoEnabledTools,
                "no enabled tool is configured",
            ));
        }

        // 2. Triggers and conditions
        for tool in &self.tools {
            for (i, trigger) in tool.triggers.iter().enumerate() {
                if trigger.conditions.is_empty() {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyTrigger,
                        format!("tool '{}': trigger {} has no conditions", tool.id, i + 1),
                    ));
                }
            }
            let context = format!("tool '{}'", tool.id);
            for condition in tool.all_conditions() {
                check_condition(&context, condition, &mut issues);
            }

            // 3. Feature sets
            self.check_feature_set(tool, &mut issues);
        }

        // 4. Identity rules
        for (i, rule) in self.file_identity.iter().enumerate() {
            if rule.conditions.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyIdentityRule,
                    format!("identity rule {} has no conditions and never matches", i + 1),
                ));
            }
            let context = format!("identity rule {}", i + 1);
            for condition in &rule.conditions {
                check_condition(&context, condition, &mut issues);
            }
        }

        // 5. Server settings
        if self.server.tool_timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidTimeout,
                "server.toolTimeoutSeconds cannot be 0",
            ));
        }

        issues
    }

    fn check_feature_set(&self, tool: &FileToolConfig, issues: &mut Vec<ConfigIssue>) {
        let feature_set = &tool.feature_set;
        if tool.triggers.is_empty() {
            for feature in feature_set.features.iter().filter(|f| f.provided_by_trigger) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::TriggerFeatureWithoutTrigger,
                    format!(
                        "tool '{}': feature '{}' is provided by a trigger but the tool has no triggers",
                        tool.id, feature.key
                    ),
                ));
            }
        }

        let weight = &feature_set.weight;
        let negative = weight.default < 0.0 || weight.conditional.iter().any(|w| w.value < 0.0);
        if negative {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NegativeWeight,
                format!("tool '{}': weights cannot be negative", tool.id),
            ));
        }

        for condition in &feature_set.merge_conditions {
            if !feature_set.declares(&condition.feature) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UndeclaredMergeFeature,
                    format!(
                        "tool '{}': merge condition on undeclared feature '{}'",
                        tool.id, condition.feature
                    ),
                ));
            }
        }
        for (feature, value_regex) in feature_set.raw_merge_conditions() {
            if let Some(pattern) = value_regex {
                check_extraction_pattern(&format!("tool '{}'", tool.id), feature, pattern, issues);
            }
        }
    }

    /// Compile into the immutable domain configuration.
    ///
    /// Every regular expression is compiled here, once.
    pub fn into_server_config(&self) -> Result<ServerConfig, DomainError> {
        let tools = self
            .tools
            .iter()
            .map(FileToolConfig::to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let file_identity_rules = self
            .file_identity
            .iter()
            .map(|rule| to_conditions(&rule.conditions).map(FileIdentityRule::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ServerConfig {
            tools,
            file_identity_rules,
        })
    }
}

fn check_condition(context: &str, condition: &FileConditionConfig, issues: &mut Vec<ConfigIssue>) {
    match (&condition.reg_ex, &condition.value) {
        (Some(_), Some(_)) => issues.push(ConfigIssue::error(
            ConfigIssueCode::AmbiguousCondition,
            format!(
                "{}: condition on '{}' sets both regEx and value",
                context, condition.feature
            ),
        )),
        (None, None) => issues.push(ConfigIssue::warning(
            ConfigIssueCode::IneffectiveCondition,
            format!(
                "{}: condition on '{}' sets neither regEx nor value and never holds",
                context, condition.feature
            ),
        )),
        _ => {}
    }
    if let Some(pattern) = &condition.reg_ex {
        check_pattern(context, &condition.feature, pattern, issues);
    }
}

fn check_pattern(context: &str, feature: &str, pattern: &str, issues: &mut Vec<ConfigIssue>) {
    if let Err(e) = compile_pattern(pattern) {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::InvalidPattern,
            format!("{}: feature '{}': {}", context, feature, e),
        ));
    }
}

fn check_extraction_pattern(
    context: &str,
    feature: &str,
    pattern: &str,
    issues: &mut Vec<ConfigIssue>,
) {
    if let Err(e) = compile_extraction_pattern(pattern) {
        let code = match e {
            DomainError::InvalidExtractionPattern { .. } => {
                ConfigIssueCode::InvalidExtractionPattern
            }
            _ => ConfigIssueCode::InvalidPattern,
        };
        issues.push(ConfigIssue::error(
            code,
            format!("{}: feature '{}': {}", context, feature, e),
        ));
    }
}
