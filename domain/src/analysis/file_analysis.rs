//! Analysis response aggregate

use crate::analysis::summary::Summary;
use crate::merge::FeatureSet;
use crate::tool::ToolResult;
use serde::{Deserialize, Serialize};

/// Everything known about one analyzed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub summary: Summary,
    /// Ranked best first
    pub feature_sets: Vec<FeatureSet>,
    /// Identification round by title, then triggered round by title
    pub tool_results: Vec<ToolResult>,
    pub duration_in_ms: u64,
}

impl FileAnalysis {
    pub fn best_match(&self) -> Option<&FeatureSet> {
        self.feature_sets.first()
    }

    pub fn failed_tools(&self) -> impl Iterator<Item = &ToolResult> {
        self.tool_results.iter().filter(|r| !r.is_success())
    }
}
