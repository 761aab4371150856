//! Domain layer for borg
//!
//! This crate contains the evidence-fusion core: the rules that decide which
//! tools run for a file and how their reports are reconciled into a verdict.
//! It has no dependencies on infrastructure or presentation concerns, and it
//! does not log; recoverable problems are returned as values.
//!
//! # Core Concepts
//!
//! ## Tools and rounds
//!
//! Every configured [`ToolConfig`] runs in one of two rounds. Tools without
//! triggers run in the identification round; tools with triggers run in the
//! triggered round if any of their [`Trigger`]s fires on the identification
//! results.
//!
//! ## Feature sets
//!
//! Tool reports are merged into coalitions of compatible results
//! ([`FeatureSet`]), scored by tool [`Weight`] and the strength of their
//! agreement, then ranked. [`FileIdentityRule`]s can override the ranking and
//! the [`Summary`] is read from the winner.

pub mod analysis;
pub mod config;
pub mod core;
pub mod feature;
pub mod merge;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use analysis::{
    FORMAT_UNCERTAIN_THRESHOLD, FileAnalysis, InvocationRound, Summary, SummaryReport,
};
pub use config::{ConfigIssue, ConfigIssueCode, ServerConfig, Severity};
pub use core::error::DomainError;
pub use feature::{FeatureCondition, FeatureValue, Features, ToolFeatureValue, ValueMatcher, keys};
pub use merge::{
    FeatureSet, FileIdentityRule, MergeCondition, MergedFeatureValue, MergedFeatures,
    apply_identity_rules, merge_feature_sets,
};
pub use tool::{
    ConditionalWeight, FeatureConfig, FeatureSetConfig, OutputFormat, ToolConfig, ToolError,
    ToolErrorCode, ToolResponse, ToolResult, ToolResults, Trigger, TriggerOutcome, Weight,
};
