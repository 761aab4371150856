//! Analyze File use case
//!
//! Orchestrates the full analysis of one stored file:
//!
//! 1. Identification round: every enabled tool without triggers, concurrently
//! 2. Trigger evaluation of the remaining tools against those results
//! 3. Triggered round: every tool that fired, concurrently
//! 4. Feature set merging, identity rules and the summary

use crate::config::AnalysisParams;
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::ports::tool_invoker::{ToolInvoker, ToolRequest};
use borg_domain::{
    DomainError, Features, FileAnalysis, InvocationRound, ServerConfig, Summary, ToolConfig,
    ToolError, ToolResponse, ToolResult, ToolResults, apply_identity_rules, merge_feature_sets,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort an analysis
///
/// Tool failures are not among them; they end up in the tool results.
#[derive(Error, Debug)]
pub enum AnalyzeFileError {
    #[error("No enabled tools configured")]
    NoEnabledTools,

    #[error("Configuration error: {0}")]
    Configuration(#[from] DomainError),
}

/// A tool selected for a round, with the features its trigger provides
struct Dispatch<'c> {
    tool: &'c ToolConfig,
    injected: Features,
}

impl<'c> Dispatch<'c> {
    fn plain(tool: &'c ToolConfig) -> Self {
        Self {
            tool,
            injected: Features::new(),
        }
    }
}

/// Use case for analyzing a single file
pub struct AnalyzeFileUseCase<I: ToolInvoker + 'static> {
    invoker: Arc<I>,
    config: Arc<ServerConfig>,
    params: AnalysisParams,
}

impl<I: ToolInvoker + 'static> AnalyzeFileUseCase<I> {
    pub fn new(invoker: Arc<I>, config: Arc<ServerConfig>) -> Self {
        Self {
            invoker,
            config,
            params: AnalysisParams::default(),
        }
    }

    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, file_id: &str) -> Result<FileAnalysis, AnalyzeFileError> {
        self.execute_with_progress(file_id, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        file_id: &str,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<FileAnalysis, AnalyzeFileError> {
        let started = Instant::now();
        if self.config.enabled_tools().next().is_none() {
            return Err(AnalyzeFileError::NoEnabledTools);
        }
        info!("Analyzing {}", file_id);

        let identification: Vec<Dispatch<'_>> = self
            .config
            .tools_in(InvocationRound::Identification)
            .map(Dispatch::plain)
            .collect();
        let identified = self
            .run_round(InvocationRound::Identification, identification, file_id, progress)
            .await;

        let triggered = self.select_triggered(&identified, progress)?;
        let validated = self
            .run_round(InvocationRound::Triggered, triggered, file_id, progress)
            .await;

        let mut all = identified.clone();
        all.extend(validated.iter().map(|(id, r)| (id.clone(), r.clone())));

        let feature_sets = merge_feature_sets(&all, &self.config.tools)?;
        let feature_sets = apply_identity_rules(feature_sets, &self.config.file_identity_rules)?;
        debug!("{} feature sets after merging", feature_sets.len());

        let report = Summary::build(&feature_sets, all.values());
        for violation in &report.violations {
            warn!("Ignoring unusable value in summary: {}", violation);
        }

        let mut tool_results = sorted_by_title(identified);
        tool_results.extend(sorted_by_title(validated));

        let duration_in_ms = started.elapsed().as_millis() as u64;
        info!(
            "Analysis of {} finished in {}ms ({} tools, {} feature sets)",
            file_id,
            duration_in_ms,
            tool_results.len(),
            feature_sets.len()
        );
        Ok(FileAnalysis {
            summary: report.summary,
            feature_sets,
            tool_results,
            duration_in_ms,
        })
    }

    /// Evaluate the triggers of every enabled triggered tool
    fn select_triggered(
        &self,
        identified: &ToolResults,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<Vec<Dispatch<'_>>, DomainError> {
        let mut selected = Vec::new();
        for tool in self.config.tools_in(InvocationRound::Triggered) {
            let outcome = tool.is_triggered(identified)?;
            if !outcome.fired {
                debug!("Tool {} not triggered", tool.id);
                progress.on_tool_skipped(&tool.id);
                continue;
            }
            debug!("Tool {} triggered by {:?}", tool.id, outcome.matches.keys());
            selected.push(Dispatch {
                tool,
                injected: tool.feature_set.trigger_provided(&outcome.matches),
            });
        }
        Ok(selected)
    }

    /// Invoke all tools of a round in parallel and wait for every one of them
    async fn run_round(
        &self,
        round: InvocationRound,
        dispatches: Vec<Dispatch<'_>>,
        file_id: &str,
        progress: &dyn AnalysisProgressNotifier,
    ) -> ToolResults {
        info!("Round {}: {} tools", round, dispatches.len());
        progress.on_round_start(round, dispatches.len());

        let mut join_set = JoinSet::new();
        for dispatch in &dispatches {
            let invoker = Arc::clone(&self.invoker);
            let request = ToolRequest {
                tool_id: dispatch.tool.id.clone(),
                endpoint: dispatch.tool.endpoint.clone(),
                file_id: file_id.to_string(),
                timeout: self.params.tool_timeout,
            };

            join_set.spawn(async move {
                let response =
                    match tokio::time::timeout(request.timeout, invoker.invoke(&request)).await {
                        Ok(response) => response,
                        Err(_) => ToolResponse::failure(ToolError::timeout(request.timeout))
                            .with_response_time(request.timeout),
                    };
                (request.tool_id, response)
            });
        }

        let by_id: BTreeMap<&str, &Dispatch<'_>> = dispatches
            .iter()
            .map(|d| (d.tool.id.as_str(), d))
            .collect();
        let mut results = ToolResults::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((tool_id, response)) => {
                    let Some(dispatch) = by_id.get(tool_id.as_str()) else {
                        continue;
                    };
                    let mut result =
                        ToolResult::from_response(&tool_id, &dispatch.tool.title, response);
                    result.inject_features(dispatch.injected.clone());
                    match &result.error {
                        None => {
                            info!("Tool {} responded in {}ms", tool_id, result.response_time_ms)
                        }
                        Some(e) => warn!("Tool {} failed: {}", tool_id, e),
                    }
                    progress.on_tool_complete(round, &result);
                    results.insert(tool_id, result);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A task that died never reported back
        for (tool_id, dispatch) in &by_id {
            if results.contains_key(*tool_id) {
                continue;
            }
            let result = ToolResult::failure(
                *tool_id,
                &dispatch.tool.title,
                ToolError::task_failed("invocation task did not complete"),
            );
            progress.on_tool_complete(round, &result);
            results.insert(tool_id.to_string(), result);
        }

        progress.on_round_complete(round);
        results
    }
}

/// Order results by display title, ties by id
fn sorted_by_title(results: ToolResults) -> Vec<ToolResult> {
    let mut results: Vec<ToolResult> = results.into_values().collect();
    results.sort_by(|a, b| a.title.cmp(&b.title));
    results
}
