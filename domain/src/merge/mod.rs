//! Merging tool results into ranked feature sets

pub mod condition;
pub mod feature_set;
pub mod identity;
pub mod merger;

pub use condition::{
    MergeCondition, MergeLink, MergeOutcome, STRONG_LINK_MODIFIER, compile_extraction_pattern,
    evaluate_merge,
};
pub use feature_set::{FeatureSet, MergedFeatureValue, MergedFeatures};
pub use identity::{FileIdentityRule, apply_identity_rules};
pub use merger::{merge_feature_sets, normalize_scores};
