//! SessionStatus enum for tracking the lifecycle of a hearing session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a hearing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Concluded,
}

impl SessionStatus {
    /// Returns true if the session can still be mutated.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SessionStatus::InProgress)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - InProgress -> Concluded
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!((self, target), (InProgress, Concluded))
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::InProgress => "InProgress",
            SessionStatus::Concluded => "Concluded",
        };
        write!(f, "{}", s)
    }
}
