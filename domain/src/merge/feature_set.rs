//! Merged feature sets
//!
//! A [`FeatureSet`] is one candidate interpretation of the file: the combined
//! features of a coalition of mutually compatible tool results, with the tools
//! backing each value and an accumulated score.

use crate::feature::{FeatureValue, Features, ToolFeatureValue};
use crate::tool::FeatureSetConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Resolved value of one feature inside a feature set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedFeatureValue {
    pub value: FeatureValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Highest merge order among the supporting tools
    #[serde(skip)]
    pub merge_order: u32,
    /// Tools that reported exactly this value
    pub supporting_tools: Vec<String>,
}

/// Merged features, keyed by feature key
pub type MergedFeatures = BTreeMap<String, MergedFeatureValue>;

/// Candidate merged interpretation of a file
///
/// Two feature sets are equal when the same tools support them, regardless of
/// the order the tools joined in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub features: MergedFeatures,
    /// Tool ids in the order they joined the coalition
    pub supporting_tools: Vec<String>,
    pub score: f64,
}

impl PartialEq for FeatureSet {
    fn eq(&self, other: &Self) -> bool {
        self.tool_ids() == other.tool_ids()
    }
}

impl FeatureSet {
    /// Add a tool's features to the set and accumulate its score contribution.
    ///
    /// For each key, a value with a strictly higher merge order replaces the
    /// current one; an equal value adds the tool as supporter; otherwise the
    /// earlier value stays.
    pub fn add_tool(
        &mut self,
        tool_id: &str,
        features: &Features,
        config: &FeatureSetConfig,
        contribution: f64,
    ) {
        for (key, value) in features {
            self.merge_feature(tool_id, key, value, config.merge_order(key));
        }
        self.supporting_tools.push(tool_id.to_string());
        self.score += contribution;
    }

    fn merge_feature(&mut self, tool_id: &str, key: &str, value: &ToolFeatureValue, order: u32) {
        let candidate = MergedFeatureValue {
            value: value.value.clone(),
            label: value.label.clone(),
            merge_order: order,
            supporting_tools: vec![tool_id.to_string()],
        };
        let Some(current) = self.features.get_mut(key) else {
            self.features.insert(key.to_string(), candidate);
            return;
        };
        if current.value == value.value {
            current.supporting_tools.push(tool_id.to_string());
            current.merge_order = current.merge_order.max(order);
            if current.label.is_none() {
                current.label = value.label.clone();
            }
        } else if order > current.merge_order {
            *current = candidate;
        }
    }

    /// Resolved value of a feature
    pub fn value(&self, key: &str) -> Option<&FeatureValue> {
        self.features.get(key).map(|v| &v.value)
    }

    /// Supporting tool ids as an order-independent set
    pub fn tool_ids(&self) -> BTreeSet<&str> {
        self.supporting_tools.iter().map(String::as_str).collect()
    }

    pub fn is_supported_by(&self, tool_id: &str) -> bool {
        self.supporting_tools.iter().any(|t| t == tool_id)
    }
}
