//! Infrastructure layer for borg
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading and the HTTP
//! tool invoker.

pub mod config;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConditionConfig, FileConfig, FileFeatureConfig,
    FileFeatureSetConfig, FileIdentityRuleConfig, FileServerConfig, FileToolConfig,
    FileTriggerConfig, FileWeightConfig,
};
pub use tools::HttpToolInvoker;
