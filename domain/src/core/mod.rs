//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: configuration-class errors raised while applying
//!   the tool configuration to results

pub mod error;
