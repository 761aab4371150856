//! Progress reporting for file analyses
//!
//! Both reporters write to stderr so JSON on stdout stays parseable.

use borg_application::AnalysisProgressNotifier;
use borg_domain::{InvocationRound, ToolResult};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during an analysis with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn round_display_name(round: InvocationRound) -> &'static str {
        match round {
            InvocationRound::Identification => "Round 1: Identification",
            InvocationRound::Triggered => "Round 2: Triggered tools",
        }
    }

    fn round_short_name(round: InvocationRound) -> &'static str {
        match round {
            InvocationRound::Identification => "Round 1",
            InvocationRound::Triggered => "Round 2",
        }
    }

    fn status_line(result: &ToolResult) -> String {
        if result.is_success() {
            format!("{} {}", "v".green(), result.title)
        } else {
            format!("{} {}", "x".red(), result.title)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: InvocationRound, total_tools: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tools as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(Self::round_display_name(round));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.round_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_tool_complete(&self, _round: InvocationRound, result: &ToolResult) {
        if let Ok(slot) = self.round_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::status_line(result));
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: InvocationRound) {
        if let Ok(mut slot) = self.round_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete!", Self::round_short_name(round).green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: InvocationRound, total_tools: usize) {
        eprintln!(
            "{} {} ({} tools)",
            "->".cyan(),
            ProgressReporter::round_display_name(round).bold(),
            total_tools
        );
    }

    fn on_tool_complete(&self, _round: InvocationRound, result: &ToolResult) {
        match &result.error {
            None => eprintln!("  {}", ProgressReporter::status_line(result)),
            Some(e) => eprintln!(
                "  {} ({})",
                ProgressReporter::status_line(result),
                e.code.as_str()
            ),
        }
    }

    fn on_round_complete(&self, _round: InvocationRound) {
        eprintln!();
    }

    fn on_tool_skipped(&self, tool_id: &str) {
        eprintln!("  {} {} (not triggered)", "-".dimmed(), tool_id);
    }
}
