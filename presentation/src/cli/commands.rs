//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary, feature sets and every tool result
    Full,
    /// Only the summary verdict
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for borg
#[derive(Parser, Debug)]
#[command(name = "borg")]
#[command(author, version, about = "File format identification by fusing many tools")]
#[command(long_about = r#"
Borg identifies and validates the format of a file by asking several
identification and validation tools and fusing their answers.

The analysis has two rounds:
1. Identification: every tool without triggers runs in parallel
2. Triggered: tools whose trigger conditions match the identification
   results run in parallel

The merged feature sets are ranked by score and summarized.

Configuration files are loaded from (in priority order):
1. --config <path>                Explicit config file
2. ./config/server_config.yml     Project-level config (or ./borg.yml)
3. ~/.config/borg/config.yml      Global config

Example:
  borg uploads/report.pdf
  borg --output json --tool-timeout 30 uploads/report.pdf
  borg --check-config --config config/server_config.yml
"#)]
pub struct Cli {
    /// File identifier passed to every tool (not required with --check-config or --show-config)
    #[arg(value_name = "FILE_ID")]
    pub file_id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Per-tool request timeout in seconds, overriding the configuration
    #[arg(long, value_name = "SECONDS")]
    pub tool_timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print progress as plain lines instead of progress bars
    #[arg(long)]
    pub simple_progress: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Validate the configuration, print every issue and exit
    #[arg(long)]
    pub check_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to daily rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
