//! Final verdict of an analysis
//!
//! The summary is read from the top-ranked feature set. Feature values of an
//! unexpected type are ignored and reported back as violations, and the
//! summary is flagged as erroneous.

use crate::core::error::DomainError;
use crate::feature::{FeatureValue, keys};
use crate::merge::FeatureSet;
use crate::tool::ToolResult;
use serde::{Deserialize, Serialize};

/// A top score below this marks the format as uncertain
pub const FORMAT_UNCERTAIN_THRESHOLD: f64 = 0.75;

/// Coarse verdict on a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub valid: bool,
    pub invalid: bool,
    pub format_uncertain: bool,
    /// Not detected at this layer, always `false`
    pub validity_conflict: bool,
    pub error: bool,
    pub puid: String,
    pub mime_type: String,
    pub format_version: String,
}

/// A summary together with the result data it had to ignore
#[derive(Debug, Clone, Default)]
pub struct SummaryReport {
    pub summary: Summary,
    pub violations: Vec<DomainError>,
}

impl Summary {
    /// Summarize ranked feature sets and the full, unranked tool results
    pub fn build<'r>(
        sets: &[FeatureSet],
        results: impl IntoIterator<Item = &'r ToolResult>,
    ) -> SummaryReport {
        let mut summary = Summary {
            error: results.into_iter().any(|r| !r.is_success()),
            ..Default::default()
        };
        let Some(top) = sets.first() else {
            summary.format_uncertain = true;
            return SummaryReport {
                summary,
                violations: Vec::new(),
            };
        };

        let mut violations = Vec::new();
        summary.format_uncertain = top.score < FORMAT_UNCERTAIN_THRESHOLD;

        match expect_bool(top, keys::FORMAT_VALID) {
            Ok(Some(valid)) => {
                summary.valid = valid;
                summary.invalid = !valid;
            }
            Ok(None) => {}
            Err(e) => violations.push(e),
        }
        for (key, slot) in [
            (keys::FORMAT_PUID, &mut summary.puid),
            (keys::FORMAT_MIME_TYPE, &mut summary.mime_type),
            (keys::FORMAT_VERSION, &mut summary.format_version),
        ] {
            match expect_string(top, key) {
                Ok(Some(value)) => *slot = value.to_string(),
                Ok(None) => {}
                Err(e) => violations.push(e),
            }
        }

        if !violations.is_empty() {
            summary.error = true;
        }
        SummaryReport {
            summary,
            violations,
        }
    }
}

fn expect_bool(set: &FeatureSet, key: &str) -> Result<Option<bool>, DomainError> {
    match set.value(key) {
        None => Ok(None),
        Some(FeatureValue::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(mismatch(key, "bool", other)),
    }
}

fn expect_string<'s>(set: &'s FeatureSet, key: &str) -> Result<Option<&'s str>, DomainError> {
    match set.value(key) {
        None => Ok(None),
        Some(FeatureValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(mismatch(key, "string", other)),
    }
}

fn mismatch(key: &str, expected: &'static str, found: &FeatureValue) -> DomainError {
    DomainError::TypeMismatch {
        feature: key.to_string(),
        context: "summary",
        expected,
        found: found.type_name(),
    }
}
