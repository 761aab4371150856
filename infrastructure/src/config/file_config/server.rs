//! Server settings from the `server` section

use borg_application::{AnalysisParams, DEFAULT_TOOL_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileServerConfig {
    /// Deadline for a single tool call
    pub tool_timeout_seconds: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            tool_timeout_seconds: DEFAULT_TOOL_TIMEOUT.as_secs(),
        }
    }
}

impl FileServerConfig {
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_seconds)
    }

    /// Convert to the parameters of the analysis use case
    pub fn to_analysis_params(&self) -> AnalysisParams {
        AnalysisParams::default().with_tool_timeout(self.tool_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = FileServerConfig::default();
        assert_eq!(config.tool_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_to_analysis_params() {
        let config = FileServerConfig {
            tool_timeout_seconds: 15,
        };
        assert_eq!(
            config.to_analysis_params().tool_timeout,
            Duration::from_secs(15)
        );
    }
}
