//! Progress notification port
//!
//! Defines the interface for reporting progress during a file analysis.

use borg_domain::{InvocationRound, ToolResult};

/// Callback for progress updates during an analysis
///
/// Implementations live in the presentation layer.
pub trait AnalysisProgressNotifier: Send + Sync {
    /// Called when a round is dispatched
    fn on_round_start(&self, round: InvocationRound, total_tools: usize);

    /// Called as each tool of the round produces its result
    fn on_tool_complete(&self, round: InvocationRound, result: &ToolResult);

    /// Called when every tool of the round has finished
    fn on_round_complete(&self, round: InvocationRound);

    /// Called when a triggered tool is skipped because none of its triggers fired
    fn on_tool_skipped(&self, _tool_id: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: InvocationRound, _total_tools: usize) {}
    fn on_tool_complete(&self, _round: InvocationRound, _result: &ToolResult) {}
    fn on_round_complete(&self, _round: InvocationRound) {}
}
