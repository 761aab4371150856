//! Immutable process-wide configuration

use crate::analysis::InvocationRound;
use crate::merge::FileIdentityRule;
use crate::tool::ToolConfig;

/// Tool and identity-rule configuration, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// In declaration order, which is also the merge candidate order
    pub tools: Vec<ToolConfig>,
    pub file_identity_rules: Vec<FileIdentityRule>,
}

impl ServerConfig {
    pub fn new(tools: Vec<ToolConfig>) -> Self {
        Self {
            tools,
            file_identity_rules: Vec::new(),
        }
    }

    pub fn with_identity_rule(mut self, rule: FileIdentityRule) -> Self {
        self.file_identity_rules.push(rule);
        self
    }

    pub fn tool(&self, id: &str) -> Option<&ToolConfig> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn enabled_tools(&self) -> impl Iterator<Item = &ToolConfig> {
        self.tools.iter().filter(|t| t.enabled)
    }

    /// Enabled tools dispatched in the given round
    pub fn tools_in(&self, round: InvocationRound) -> impl Iterator<Item = &ToolConfig> {
        self.enabled_tools().filter(move |t| t.round() == round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureCondition;
    use crate::tool::Trigger;

    fn config() -> ServerConfig {
        ServerConfig::new(vec![
            ToolConfig::new("droid", "http://droid"),
            ToolConfig::new("magika", "http://magika").disabled(),
            ToolConfig::new("jhove", "http://jhove").with_trigger(Trigger::new(vec![
                FeatureCondition::literal("format:puid", "fmt/18"),
            ])),
        ])
    }

    #[test]
    fn test_tools_by_round() {
        let config = config();
        let identification: Vec<&str> = config
            .tools_in(InvocationRound::Identification)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(identification, vec!["droid"]);

        let triggered: Vec<&str> = config
            .tools_in(InvocationRound::Triggered)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(triggered, vec!["jhove"]);
    }

    #[test]
    fn test_lookup() {
        let config = config();
        assert_eq!(config.tool("magika").map(|t| t.enabled), Some(false));
        assert!(config.tool("tika").is_none());
        assert_eq!(config.enabled_tools().count(), 2);
    }
}
