//! Invocation rounds

use std::fmt;

/// The two sequential fan-out rounds of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InvocationRound {
    /// Tools without triggers, run for every file
    Identification,
    /// Tools whose triggers fired on the identification results
    Triggered,
}

impl InvocationRound {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationRound::Identification => "identification",
            InvocationRound::Triggered => "triggered",
        }
    }
}

impl fmt::Display for InvocationRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
