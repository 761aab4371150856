//! Analysis parameters: per-request execution control.
//!
//! [`AnalysisParams`] groups the static parameters that control how
//! [`AnalyzeFileUseCase`](crate::use_cases::analyze_file::AnalyzeFileUseCase)
//! dispatches tools. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-tool timeout; tools can be slow JVM processes
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Deadline for each single tool call
    pub tool_timeout: Duration,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }
}

impl AnalysisParams {
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }
}
