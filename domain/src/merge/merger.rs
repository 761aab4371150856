//! Feature set merger
//!
//! Every successful tool result seeds a coalition. The seed then admits, in
//! configuration order, each other result compatible with the coalition's
//! merged state under the merge conditions of the candidate and of every
//! member. Coalitions backed by the same tools are collapsed, and the scores
//! are normalized into a ranking.

use crate::core::error::DomainError;
use crate::merge::condition::{MergeCondition, evaluate_merge};
use crate::merge::feature_set::FeatureSet;
use crate::tool::{ToolConfig, ToolResult, ToolResults};

/// Build, deduplicate, normalize and rank the feature sets of an analysis
pub fn merge_feature_sets(
    results: &ToolResults,
    tools: &[ToolConfig],
) -> Result<Vec<FeatureSet>, DomainError> {
    if let Some(unknown) = results.keys().find(|id| !tools.iter().any(|t| &t.id == *id)) {
        return Err(DomainError::UnknownTool(unknown.clone()));
    }
    let candidates: Vec<(&ToolConfig, &ToolResult)> = tools
        .iter()
        .filter_map(|tool| results.get(&tool.id).map(|result| (tool, result)))
        .filter(|(_, result)| result.is_mergeable())
        .collect();

    let mut sets: Vec<FeatureSet> = Vec::new();
    for &(seed, seed_result) in &candidates {
        let set = build_coalition(seed, seed_result, &candidates)?;
        if !sets.contains(&set) {
            sets.push(set);
        }
    }
    Ok(normalize_scores(sets))
}

fn build_coalition(
    seed: &ToolConfig,
    seed_result: &ToolResult,
    candidates: &[(&ToolConfig, &ToolResult)],
) -> Result<FeatureSet, DomainError> {
    let mut set = FeatureSet::default();
    set.add_tool(
        &seed.id,
        &seed_result.features,
        &seed.feature_set,
        seed.weight_of(seed_result)?,
    );
    let mut members = vec![seed];

    for &(tool, result) in candidates {
        if tool.id == seed.id {
            continue;
        }
        let conditions = coalition_conditions(tool, &members);
        let outcome = evaluate_merge(conditions, &set.features, &result.features)?;
        if !outcome.mergeable {
            continue;
        }
        let contribution = outcome.modifier * tool.weight_of(result)?;
        set.add_tool(&tool.id, &result.features, &tool.feature_set, contribution);
        members.push(tool);
    }
    Ok(set)
}

/// Union of the candidate's and the members' merge conditions, without repeats
fn coalition_conditions<'c>(
    candidate: &'c ToolConfig,
    members: &[&'c ToolConfig],
) -> Vec<&'c MergeCondition> {
    let all = candidate
        .feature_set
        .merge_conditions
        .iter()
        .chain(members.iter().flat_map(|m| m.feature_set.merge_conditions.iter()));
    let mut conditions: Vec<&MergeCondition> = Vec::new();
    for condition in all {
        if !conditions.iter().any(|known| known.same_rule(condition)) {
            conditions.push(condition);
        }
    }
    conditions
}

/// Divide every score by the total and sort descending.
///
/// With a total of zero there is nothing to rank and no set is returned.
pub fn normalize_scores(mut sets: Vec<FeatureSet>) -> Vec<FeatureSet> {
    let total: f64 = sets.iter().map(|s| s.score).sum();
    if total <= 0.0 || total.is_nan() {
        return Vec::new();
    }
    for set in &mut sets {
        set.score /= total;
    }
    sets.sort_by(|a, b| b.score.total_cmp(&a.score));
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Features, ToolFeatureValue};
    use crate::tool::{FeatureConfig, FeatureSetConfig, ToolError, ToolResponse, Weight};

    fn tool(id: &str, weight: f64, merge_on: &[&str]) -> ToolConfig {
        ToolConfig::new(id, format!("http://{}/identify", id)).with_feature_set(FeatureSetConfig {
            features: vec![
                FeatureConfig::new("format:puid", 1),
                FeatureConfig::new("format:mimeType", 1),
            ],
            weight: Weight::fixed(weight),
            merge_conditions: merge_on.iter().map(|f| MergeCondition::new(*f)).collect(),
        })
    }

    fn result(id: &str, pairs: &[(&str, &str)]) -> (String, ToolResult) {
        let response = ToolResponse {
            features: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), ToolFeatureValue::new(*v)))
                .collect::<Features>(),
            ..Default::default()
        };
        (id.to_string(), ToolResult::from_response(id, id, response))
    }

    fn set_with_score(id: &str, score: f64) -> FeatureSet {
        FeatureSet {
            supporting_tools: vec![id.to_string()],
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_tool_scores_one() {
        let tools = vec![tool("droid", 0.6, &["format:puid"])];
        let results = ToolResults::from([result(
            "droid",
            &[("format:puid", "fmt/18"), ("format:mimeType", "application/pdf")],
        )]);

        let sets = merge_feature_sets(&results, &tools).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].score, 1.0);
        assert_eq!(sets[0].supporting_tools, vec!["droid"]);
    }

    #[test]
    fn test_duplicate_coalitions_collapse() {
        let tools = vec![
            tool("droid", 1.0, &["format:puid"]),
            tool("siegfried", 1.0, &["format:puid"]),
        ];
        let results = ToolResults::from([
            result("droid", &[("format:puid", "fmt/18")]),
            result("siegfried", &[("format:puid", "fmt/18")]),
        ]);

        let sets = merge_feature_sets(&results, &tools).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].tool_ids().len(), 2);
        assert_eq!(sets[0].score, 1.0);
    }

    #[test]
    fn test_conflicting_tools_form_separate_sets() {
        let tools = vec![
            tool("droid", 0.8, &["format:puid"]),
            tool("siegfried", 0.2, &["format:puid"]),
        ];
        let results = ToolResults::from([
            result("droid", &[("format:puid", "fmt/18")]),
            result("siegfried", &[("format:puid", "fmt/19")]),
        ]);

        let sets = merge_feature_sets(&results, &tools).unwrap();
        assert_eq!(sets.len(), 2);
        assert!((sets[0].score - 0.8).abs() < 1e-9);
        assert!((sets[1].score - 0.2).abs() < 1e-9);
        assert_eq!(sets[0].value("format:puid"), Some(&"fmt/18".into()));
    }

    #[test]
    fn test_member_conditions_are_enforced() {
        // tika has no merge conditions of its own, droid insists on the mime type
        let tools = vec![
            tool("droid", 1.0, &["format:mimeType"]),
            tool("magika", 1.0, &["format:puid"]),
            tool("tika", 1.0, &[]),
        ];
        let results = ToolResults::from([
            result("droid", &[("format:puid", "fmt/18"), ("format:mimeType", "application/pdf")]),
            result("magika", &[("format:puid", "fmt/18"), ("format:mimeType", "text/plain")]),
            result("tika", &[("format:mimeType", "application/pdf")]),
        ]);

        let sets = merge_feature_sets(&results, &tools).unwrap();
        let droid_set = sets.iter().find(|s| s.supporting_tools[0] == "droid").unwrap();
        // magika agrees on the puid but contradicts droid's mime type condition
        assert!(!droid_set.is_supported_by("magika"));
        assert!(droid_set.is_supported_by("tika"));
    }

    #[test]
    fn test_errored_results_are_ignored() {
        let tools = vec![tool("droid", 1.0, &["format:puid"]), tool("jhove", 1.0, &[])];
        let mut results = ToolResults::from([result("droid", &[("format:puid", "fmt/18")])]);
        results.insert(
            "jhove".to_string(),
            ToolResult::failure("jhove", "JHOVE", ToolError::invalid_response()),
        );

        let sets = merge_feature_sets(&results, &tools).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(!sets[0].is_supported_by("jhove"));
    }

    #[test]
    fn test_unknown_tool_is_error() {
        let tools = vec![tool("droid", 1.0, &[])];
        let results = ToolResults::from([result("mediainfo", &[("format:puid", "fmt/18")])]);
        assert_eq!(
            merge_feature_sets(&results, &tools).unwrap_err(),
            DomainError::UnknownTool("mediainfo".to_string())
        );
    }

    #[test]
    fn test_no_results_no_sets() {
        let tools = vec![tool("droid", 1.0, &[])];
        assert!(merge_feature_sets(&ToolResults::new(), &tools).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent_on_unit_total() {
        let sets = normalize_scores(vec![
            set_with_score("a", 0.6),
            set_with_score("b", 0.3),
            set_with_score("c", 0.1),
        ]);
        let scores: Vec<f64> = sets.iter().map(|s| s.score).collect();
        let expected = [0.6, 0.3, 0.1];
        for (score, expected) in scores.iter().zip(expected) {
            assert!((score - expected).abs() < 1e-9);
        }
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_sorts_descending() {
        let sets = normalize_scores(vec![set_with_score("low", 1.0), set_with_score("high", 3.0)]);
        assert_eq!(sets[0].supporting_tools, vec!["high"]);
        assert_eq!(sets[0].score, 0.75);
        assert_eq!(sets[1].score, 0.25);
    }

    #[test]
    fn test_normalize_zero_total_yields_nothing() {
        let sets = normalize_scores(vec![set_with_score("a", 0.0), set_with_score("b", 0.0)]);
        assert!(sets.is_empty());
    }
}
