//! Configuration value objects for the domain layer

pub mod server_config;
pub mod validation;

pub use server_config::ServerConfig;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
