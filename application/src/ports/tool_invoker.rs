//! Tool invoker port
//!
//! Defines how the application layer calls an external tool for one file.

use async_trait::async_trait;
use borg_domain::ToolResponse;
use std::time::Duration;

/// One call of one tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub tool_id: String,
    pub endpoint: String,
    /// Identifier of the stored file, passed to the tool as is
    pub file_id: String,
    pub timeout: Duration,
}

/// Port for tool invocation
///
/// Implementations (adapters) live in the infrastructure layer. Invocation
/// never fails as a whole: transport problems, bad statuses and undecodable
/// bodies come back as a [`ToolResponse`] carrying a
/// [`ToolError`](borg_domain::ToolError).
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, request: &ToolRequest) -> ToolResponse;
}
