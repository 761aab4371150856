//! Use cases

pub mod analyze_file;
