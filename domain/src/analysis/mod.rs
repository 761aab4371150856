//! Analysis rounds and results

pub mod file_analysis;
pub mod round;
pub mod summary;

pub use file_analysis::FileAnalysis;
pub use round::InvocationRound;
pub use summary::{FORMAT_UNCERTAIN_THRESHOLD, Summary, SummaryReport};
