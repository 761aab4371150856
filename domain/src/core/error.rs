//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant describes an operator mistake in the static configuration
/// (or a tool/config contract violation detected while applying it). They are
/// never produced by a tool simply failing, which is recorded on its
/// [`ToolResult`](crate::tool::ToolResult) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("configuration error: {context} requires a {expected} feature value for '{feature}', got {found}")]
    TypeMismatch {
        feature: String,
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("configuration error: a tool provided weight was set for tool '{0}' that did not supply a score")]
    MissingToolScore(String),

    #[error("configuration error: no tool configured with id '{0}'")]
    UnknownTool(String),

    #[error("configuration error: invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("configuration error: value extraction expression '{pattern}' must have exactly one capture group, found {groups}")]
    InvalidExtractionPattern { pattern: String, groups: usize },
}

impl DomainError {
    /// Check if this error comes from a feature value of the wrong type
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, DomainError::TypeMismatch { .. })
    }
}
