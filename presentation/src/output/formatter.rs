//! Output formatter trait

use borg_domain::FileAnalysis;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Format the complete analysis
    fn format(&self, analysis: &FileAnalysis) -> String;

    /// Format as JSON
    fn format_json(&self, analysis: &FileAnalysis) -> String;

    /// Format the summary only (concise output)
    fn format_summary_only(&self, analysis: &FileAnalysis) -> String;
}
