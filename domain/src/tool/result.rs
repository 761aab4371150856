//! Tool results: the per-request outcome of invoking one tool
//!
//! Every dispatched tool yields exactly one [`ToolResult`], successful or
//! not. Failure kinds are distinguished by [`ToolErrorCode`] so callers can
//! tell a slow tool from a crashed one:
//!
//! | Code | Cause |
//! |------|-------|
//! | `TIMEOUT` | No complete response within the per-call timeout |
//! | `REQUEST_FAILED` | Request could not be built or sent |
//! | `HTTP_STATUS` | Endpoint answered with a non-2xx status |
//! | `INVALID_RESPONSE` | 2xx body was not the expected JSON |
//! | `TOOL_REPORTED` | Tool answered but reported its own error |
//! | `TASK_FAILED` | The invocation task itself died |

use crate::feature::Features;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Format of a tool's raw output text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Xml,
    Csv,
}

impl OutputFormat {
    /// Map a tool-supplied format tag, treating anything unknown as text
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "xml" => OutputFormat::Xml,
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Text,
        }
    }
}

/// Failure category of a tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorCode {
    Timeout,
    RequestFailed,
    HttpStatus,
    InvalidResponse,
    ToolReported,
    TaskFailed,
}

impl ToolErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolErrorCode::Timeout => "TIMEOUT",
            ToolErrorCode::RequestFailed => "REQUEST_FAILED",
            ToolErrorCode::HttpStatus => "HTTP_STATUS",
            ToolErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ToolErrorCode::ToolReported => "TOOL_REPORTED",
            ToolErrorCode::TaskFailed => "TASK_FAILED",
        }
    }
}

/// Error recorded on a failed tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: ToolErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: ToolErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            ToolErrorCode::Timeout,
            format!("tool request timed out after {} ms", after.as_millis()),
        )
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::new(ToolErrorCode::RequestFailed, message)
    }

    pub fn http_status(status: u16) -> Self {
        Self::new(
            ToolErrorCode::HttpStatus,
            format!("tool request error: {}", status),
        )
    }

    pub fn invalid_response() -> Self {
        Self::new(ToolErrorCode::InvalidResponse, "error parsing tool response")
    }

    pub fn tool_reported(message: impl Into<String>) -> Self {
        Self::new(ToolErrorCode::ToolReported, message)
    }

    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::new(ToolErrorCode::TaskFailed, message)
    }

    pub fn is_timeout(&self) -> bool {
        self.code == ToolErrorCode::Timeout
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ToolError {}

/// Raw outcome of one call to a tool endpoint, before it is bound to a tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolResponse {
    /// Tool version as reported by the tool itself
    pub tool_version: String,
    pub tool_output: String,
    pub output_format: OutputFormat,
    pub features: Features,
    /// Confidence reported by the tool, if it supports one
    pub score: Option<f64>,
    pub error: Option<ToolError>,
    pub response_time_ms: u64,
}

impl ToolResponse {
    /// Create a response that carries nothing but an error
    pub fn failure(error: ToolError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    /// Attach diagnostic output to the response
    pub fn with_output(mut self, output: impl Into<String>, format: OutputFormat) -> Self {
        self.tool_output = output.into();
        self.output_format = format;
        self
    }

    pub fn with_response_time(mut self, elapsed: Duration) -> Self {
        self.response_time_ms = elapsed.as_millis() as u64;
        self
    }
}

/// Outcome of invoking one tool for one analysis request
///
/// A result carries either features (success) or an error (failure). Any
/// features a failing tool reported are dropped when the result is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// Tool identifier from the configuration
    pub id: String,
    /// Display title from the configuration
    pub title: String,
    pub tool_version: String,
    pub tool_output: String,
    pub output_format: OutputFormat,
    pub features: Features,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Bind a raw response to the tool it came from
    pub fn from_response(
        id: impl Into<String>,
        title: impl Into<String>,
        response: ToolResponse,
    ) -> Self {
        let features = if response.error.is_some() {
            Features::new()
        } else {
            response.features
        };
        Self {
            id: id.into(),
            title: title.into(),
            tool_version: response.tool_version,
            tool_output: response.tool_output,
            output_format: response.output_format,
            features,
            score: response.score,
            response_time_ms: response.response_time_ms,
            error: response.error,
        }
    }

    /// Create a failed result with no output
    pub fn failure(id: impl Into<String>, title: impl Into<String>, error: ToolError) -> Self {
        Self::from_response(id, title, ToolResponse::failure(error))
    }

    /// Check if the invocation was successful
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Whether this result can take part in feature set merging
    pub fn is_mergeable(&self) -> bool {
        self.is_success() && !self.features.is_empty()
    }

    /// Insert features supplied by a trigger match.
    ///
    /// They overwrite whatever the tool reported for the same keys. Failed
    /// results stay feature-free.
    pub fn inject_features(&mut self, injected: Features) {
        if self.is_success() {
            self.features.extend(injected);
        }
    }
}

/// All results of one analysis, keyed by tool id
pub type ToolResults = BTreeMap<String, ToolResult>;
