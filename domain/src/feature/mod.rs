//! Feature values and the conditions evaluated against them
//!
//! Every tool reports what it found about a file as a map of feature key to
//! [`ToolFeatureValue`]. Keys are free-form strings chosen by the tool
//! adapters; the few keys the summary relies on are listed in [`keys`].

pub mod condition;
pub mod value;

pub use condition::{FeatureCondition, ValueMatcher, all_conditions_hold, compile_pattern};
pub use value::{FeatureValue, Features, ToolFeatureValue};

/// Feature keys with a fixed meaning in the summary
pub mod keys {
    /// Boolean validity verdict of a validator
    pub const FORMAT_VALID: &str = "format:valid";
    /// PRONOM unique identifier, e.g. `fmt/18`
    pub const FORMAT_PUID: &str = "format:puid";
    pub const FORMAT_MIME_TYPE: &str = "format:mimeType";
    pub const FORMAT_VERSION: &str = "format:version";
}
