//! Configuration file loading for borg
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project: `./config/server_config.yml` or `./borg.yml`
//! 3. XDG config: `$XDG_CONFIG_HOME/borg/config.yml`
//! 4. Fallback: `~/.config/borg/config.yml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileConditionConfig, FileConditionalWeight, FileConfig, FileFeatureConfig,
    FileFeatureMergeCondition, FileFeatureSetConfig, FileIdentityRuleConfig,
    FileMergeConditionConfig, FileServerConfig, FileToolConfig, FileTriggerConfig,
    FileWeightConfig,
};
pub use loader::ConfigLoader;
