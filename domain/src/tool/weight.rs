//! Tool weights
//!
//! The weight scales how much a tool's result contributes to the score of a
//! merged feature set. Resolution priority:
//!
//! 1. the first [`ConditionalWeight`] whose conditions hold on the tool's own result
//! 2. the tool's self-reported score, if the weight is tool-provided
//! 3. the static default

use crate::core::error::DomainError;
use crate::feature::{FeatureCondition, all_conditions_hold};
use crate::tool::result::ToolResult;

/// Weight applied when the tool's own result satisfies all conditions
#[derive(Debug, Clone)]
pub struct ConditionalWeight {
    pub value: f64,
    pub conditions: Vec<FeatureCondition>,
}

impl ConditionalWeight {
    pub fn new(value: f64, conditions: Vec<FeatureCondition>) -> Self {
        Self { value, conditions }
    }

    pub fn is_fulfilled(&self, result: &ToolResult) -> Result<bool, DomainError> {
        all_conditions_hold(&self.conditions, |key| {
            result.features.get(key).map(|v| &v.value)
        })
    }
}

/// Weight policy of a tool
#[derive(Debug, Clone)]
pub struct Weight {
    pub default: f64,
    pub conditional: Vec<ConditionalWeight>,
    /// Use the score the tool reports about itself
    pub provided_by_tool: bool,
}

impl Default for Weight {
    fn default() -> Self {
        Self::fixed(1.0)
    }
}

impl Weight {
    /// A weight that is always `value`
    pub fn fixed(value: f64) -> Self {
        Self {
            default: value,
            conditional: Vec::new(),
            provided_by_tool: false,
        }
    }

    pub fn with_conditional(mut self, weight: ConditionalWeight) -> Self {
        self.conditional.push(weight);
        self
    }

    pub fn provided_by_tool(mut self) -> Self {
        self.provided_by_tool = true;
        self
    }

    /// Resolve the weight of a result produced by the tool owning this policy
    pub fn resolve(&self, result: &ToolResult) -> Result<f64, DomainError> {
        for conditional in &self.conditional {
            if conditional.is_fulfilled(result)? {
                return Ok(conditional.value);
            }
        }
        if self.provided_by_tool {
            return result
                .score
                .ok_or_else(|| DomainError::MissingToolScore(result.id.clone()));
        }
        Ok(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Features, ToolFeatureValue};
    use crate::tool::result::ToolResponse;

    fn result(features: &[(&str, bool)], score: Option<f64>) -> ToolResult {
        let response = ToolResponse {
            features: features
                .iter()
                .map(|(k, v)| (k.to_string(), ToolFeatureValue::new(*v)))
                .collect::<Features>(),
            score,
            ..Default::default()
        };
        ToolResult::from_response("tool", "Tool", response)
    }

    #[test]
    fn test_conditional_weight_has_priority() {
        let weight = Weight::fixed(0.5).with_conditional(ConditionalWeight::new(
            0.9,
            vec![FeatureCondition::literal("v", true)],
        ));

        assert_eq!(weight.resolve(&result(&[("v", true)], None)).unwrap(), 0.9);
        assert_eq!(weight.resolve(&result(&[("v", false)], None)).unwrap(), 0.5);
        assert_eq!(weight.resolve(&result(&[], None)).unwrap(), 0.5);
    }

    #[test]
    fn test_tool_provided_weight() {
        let weight = Weight::fixed(0.5).provided_by_tool();
        assert_eq!(weight.resolve(&result(&[], Some(0.83))).unwrap(), 0.83);
    }

    #[test]
    fn test_tool_provided_weight_without_score_is_error() {
        let weight = Weight::fixed(0.5).provided_by_tool();
        let err = weight.resolve(&result(&[], None)).unwrap_err();
        assert_eq!(err, DomainError::MissingToolScore("tool".to_string()));
    }

    #[test]
    fn test_conditional_beats_tool_provided() {
        let weight = Weight::fixed(0.5)
            .provided_by_tool()
            .with_conditional(ConditionalWeight::new(
                0.1,
                vec![FeatureCondition::literal("format:isText", true)],
            ));
        let r = result(&[("format:isText", true)], Some(0.99));
        assert_eq!(weight.resolve(&r).unwrap(), 0.1);
    }
}
