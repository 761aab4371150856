//! Console output formatter for analysis results

use crate::output::formatter::OutputFormatter;
use borg_domain::{FeatureSet, FileAnalysis, Summary, ToolResult};
use colored::Colorize;

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete analysis
    pub fn format(analysis: &FileAnalysis) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("File Analysis Results"));
        output.push('\n');

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&Self::summary_lines(&analysis.summary));

        output.push_str(&Self::section_header("Feature Sets"));
        if analysis.feature_sets.is_empty() {
            output.push_str(&format!("\n{}\n", "No tool produced usable features".dimmed()));
        }
        for (rank, set) in analysis.feature_sets.iter().enumerate() {
            output.push_str(&Self::feature_set(rank + 1, set));
        }

        output.push_str(&Self::section_header("Tool Results"));
        for result in &analysis.tool_results {
            output.push_str(&Self::tool_result(result));
        }

        output.push_str(&format!(
            "\n{} {} ms\n",
            "Duration:".cyan().bold(),
            analysis.duration_in_ms
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(analysis: &FileAnalysis) -> String {
        serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(analysis: &FileAnalysis) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "=== Borg Summary ===".cyan().bold()));
        output.push_str(&Self::summary_lines(&analysis.summary));
        output
    }

    fn summary_lines(summary: &Summary) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n  {:<10} {}\n", "PUID:".bold(), or_dash(&summary.puid)));
        output.push_str(&format!(
            "  {:<10} {}\n",
            "MIME type:".bold(),
            or_dash(&summary.mime_type)
        ));
        output.push_str(&format!(
            "  {:<10} {}\n",
            "Version:".bold(),
            or_dash(&summary.format_version)
        ));

        let validity = if summary.valid {
            "valid".green().to_string()
        } else if summary.invalid {
            "invalid".red().to_string()
        } else {
            "unknown".dimmed().to_string()
        };
        output.push_str(&format!("  {:<10} {}\n", "Validity:".bold(), validity));

        if summary.format_uncertain {
            output.push_str(&format!("  {}\n", "! format uncertain".yellow()));
        }
        if summary.validity_conflict {
            output.push_str(&format!("  {}\n", "! tools disagree on validity".yellow()));
        }
        if summary.error {
            output.push_str(&format!("  {}\n", "! errors occurred during analysis".red()));
        }
        output
    }

    fn feature_set(rank: usize, set: &FeatureSet) -> String {
        let mut output = format!(
            "\n{}\n",
            format!("── #{} score {:.2} ──", rank, set.score).yellow().bold()
        );
        output.push_str(&format!(
            "  {} {}\n",
            "Tools:".dimmed(),
            set.supporting_tools.join(", ")
        ));
        for (key, merged) in &set.features {
            let label = merged
                .label
                .as_deref()
                .map(|l| format!(" ({})", l))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {} = {}{} {}\n",
                key.cyan(),
                merged.value,
                label,
                format!("[{}]", merged.supporting_tools.join(", ")).dimmed()
            ));
        }
        output
    }

    fn tool_result(result: &ToolResult) -> String {
        let version = if result.tool_version.is_empty() {
            String::new()
        } else {
            format!(" {}", result.tool_version)
        };
        match &result.error {
            None => format!(
                "  {} {}{} {} {}\n",
                "v".green(),
                result.title,
                version,
                format!("({})", result.id).dimmed(),
                format!("{} ms", result.response_time_ms).dimmed()
            ),
            Some(error) => format!(
                "  {} {}{} {} {}\n{}\n",
                "x".red(),
                result.title,
                version,
                format!("({})", result.id).dimmed(),
                format!("{} ms", result.response_time_ms).dimmed(),
                Self::indent(&error.to_string(), "      ").red()
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, analysis: &FileAnalysis) -> String {
        Self::format(analysis)
    }

    fn format_json(&self, analysis: &FileAnalysis) -> String {
        Self::format_json(analysis)
    }

    fn format_summary_only(&self, analysis: &FileAnalysis) -> String {
        Self::format_summary_only(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borg_domain::{
        FeatureSetConfig, Features, ToolError, ToolFeatureValue, ToolResponse, ToolResult,
    };

    fn analysis() -> FileAnalysis {
        let features = Features::from([(
            "format:puid".to_string(),
            ToolFeatureValue::new("fmt/18").with_label("PDF 1.4"),
        )]);
        let mut set = FeatureSet::default();
        set.add_tool("droid", &features, &FeatureSetConfig::default(), 1.0);
        set.score = 1.0;

        FileAnalysis {
            summary: Summary {
                puid: "fmt/18".to_string(),
                valid: true,
                error: true,
                ..Default::default()
            },
            feature_sets: vec![set],
            tool_results: vec![
                ToolResult::from_response(
                    "droid",
                    "DROID",
                    ToolResponse {
                        tool_version: "6.7.0".to_string(),
                        features,
                        ..Default::default()
                    },
                ),
                ToolResult::failure("jhove", "JHOVE", ToolError::http_status(502)),
            ],
            duration_in_ms: 42,
        }
    }

    #[test]
    fn test_format_full() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&analysis());
        assert!(output.contains("fmt/18"));
        assert!(output.contains("PDF 1.4"));
        assert!(output.contains("DROID 6.7.0"));
        assert!(output.contains("[HTTP_STATUS] tool request error: 502"));
        assert!(output.contains("errors occurred"));
        assert!(output.contains("42 ms"));
    }

    #[test]
    fn test_format_summary_only() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_summary_only(&analysis());
        assert!(output.contains("fmt/18"));
        assert!(output.contains("valid"));
        assert!(!output.contains("JHOVE"));
    }

    #[test]
    fn test_format_json() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&analysis())).unwrap();
        assert_eq!(json["summary"]["puid"], "fmt/18");
        assert_eq!(json["durationInMs"], 42);
        assert_eq!(json["toolResults"][1]["error"]["code"], "HTTP_STATUS");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
