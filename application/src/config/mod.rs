//! Application-level configuration.

pub mod analysis_params;

pub use analysis_params::{AnalysisParams, DEFAULT_TOOL_TIMEOUT};
