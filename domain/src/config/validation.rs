//! Configuration issues
//!
//! Problems found while checking a configuration file before it is turned
//! into a [`ServerConfig`](super::ServerConfig).

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Two tools share an id; results are keyed by id.
    DuplicateToolId,
    EmptyEndpoint,
    /// Nothing would ever be invoked.
    NoEnabledTools,
    /// A trigger without conditions.
    EmptyTrigger,
    /// A condition with both a pattern and a literal value.
    AmbiguousCondition,
    /// A condition with neither a pattern nor a literal value; it never holds.
    IneffectiveCondition,
    /// An identity rule without conditions; it never matches.
    EmptyIdentityRule,
    /// A trigger-provided feature on a tool that has no trigger.
    TriggerFeatureWithoutTrigger,
    NegativeWeight,
    /// A merge condition on a feature the tool does not declare.
    UndeclaredMergeFeature,
    /// A regular expression that does not compile.
    InvalidPattern,
    /// A merge value extraction expression without exactly one capture group.
    InvalidExtractionPattern,
    /// A tool timeout of zero.
    InvalidTimeout,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Whether any of the issues is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {:?}: {}", level, self.code, self.message)
    }
}
