//! Configuration errors

use borg_domain::{ConfigIssue, DomainError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that keep the configuration from being used
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration ({} errors): {}", .0.len(), first_message(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("Failed to compile configuration: {0}")]
    Compile(#[from] DomainError),
}

fn first_message(issues: &[ConfigIssue]) -> &str {
    issues.first().map(|i| i.message.as_str()).unwrap_or("")
}
