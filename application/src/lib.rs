//! Application layer for borg
//!
//! This crate contains the analysis use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AnalysisParams, DEFAULT_TOOL_TIMEOUT};
pub use ports::{
    progress::{AnalysisProgressNotifier, NoProgress},
    tool_invoker::{ToolInvoker, ToolRequest},
};
pub use use_cases::analyze_file::{AnalyzeFileError, AnalyzeFileUseCase};
