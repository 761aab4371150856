//! Port definitions
//!
//! Interfaces the analysis use case depends on. Adapters live in the
//! infrastructure and presentation layers.

pub mod progress;
pub mod tool_invoker;
