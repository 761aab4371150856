//! Tool domain module
//!
//! A *tool* is an external identification or validation service (DROID,
//! JHOVE, Siegfried, veraPDF, ...) reachable over HTTP. This module holds its
//! static configuration and the outcome of invoking it.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐  triggers  ┌────────────────┐  invoke  ┌───────────────┐
//! │ ToolConfig   │───────────▶│ TriggerOutcome │─────────▶│ ToolResult    │
//! │ (static)     │            │ (matches)      │          │ (per request) │
//! └──────┬───────┘            └────────────────┘          └───────────────┘
//!        │
//!        └─ feature_set: merge orders, weight policy, merge conditions
//! ```
//!
//! # Invocation Rounds
//!
//! | Triggers | Round |
//! |----------|-------|
//! | none | identification (always runs) |
//! | one or more | triggered (runs only if a trigger fires on identification results) |
//!
//! # Key Types
//!
//! - [`ToolConfig`]: identity, endpoint, triggers and [`FeatureSetConfig`]
//! - [`Trigger`]: conjunction of [`FeatureCondition`](crate::FeatureCondition)s
//! - [`Weight`]: conditional, tool-provided or default contribution weight
//! - [`ToolResult`]: features or a [`ToolError`], never both

pub mod config;
pub mod result;
pub mod trigger;
pub mod weight;

pub use config::{FeatureConfig, FeatureSetConfig, ToolConfig};
pub use result::{OutputFormat, ToolError, ToolErrorCode, ToolResponse, ToolResult, ToolResults};
pub use trigger::{Trigger, TriggerOutcome};
pub use weight::{ConditionalWeight, Weight};
