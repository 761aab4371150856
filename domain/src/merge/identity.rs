//! File identity rules
//!
//! An identity rule states that a feature set matching all of its conditions
//! is authoritative. The first feature set matched by any rule is promoted to
//! the front with the full score; all others are demoted to zero.

use crate::core::error::DomainError;
use crate::feature::{FeatureCondition, all_conditions_hold};
use crate::merge::feature_set::FeatureSet;

/// Conditions under which a feature set is taken as the file's identity
#[derive(Debug, Clone, Default)]
pub struct FileIdentityRule {
    pub conditions: Vec<FeatureCondition>,
}

impl FileIdentityRule {
    pub fn new(conditions: Vec<FeatureCondition>) -> Self {
        Self { conditions }
    }

    /// A rule without conditions never matches.
    pub fn is_fulfilled_by(&self, set: &FeatureSet) -> Result<bool, DomainError> {
        if self.conditions.is_empty() {
            return Ok(false);
        }
        all_conditions_hold(&self.conditions, |key| set.value(key))
    }
}

/// Promote the first feature set fulfilling any rule.
///
/// Sets are checked in ranking order. Without a match the ranking is returned
/// untouched.
pub fn apply_identity_rules(
    mut sets: Vec<FeatureSet>,
    rules: &[FileIdentityRule],
) -> Result<Vec<FeatureSet>, DomainError> {
    if rules.is_empty() {
        return Ok(sets);
    }
    let mut winner = None;
    'sets: for (index, set) in sets.iter().enumerate() {
        for rule in rules {
            if rule.is_fulfilled_by(set)? {
                winner = Some(index);
                break 'sets;
            }
        }
    }
    let Some(index) = winner else {
        return Ok(sets);
    };

    let mut promoted = sets.remove(index);
    promoted.score = 1.0;
    for set in &mut sets {
        set.score = 0.0;
    }
    sets.insert(0, promoted);
    Ok(sets)
}
