//! Progress reporting for running analyses

pub mod reporter;
