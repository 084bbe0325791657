//! Verdict computation.
//!
//! The thresholds are engine-level configuration shared by every consumer:
//! the live session flow and the feedback report both resolve a score
//! through [`compute_verdict`], never through local copies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum score for a fully granted claim.
pub const GRANTED_THRESHOLD: i32 = 70;

/// Minimum score for a partially granted claim.
pub const PARTIALLY_GRANTED_THRESHOLD: i32 = 50;

/// Final categorical outcome of a concluded hearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Granted,
    PartiallyGranted,
    Denied,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Granted => "Granted",
            Verdict::PartiallyGranted => "PartiallyGranted",
            Verdict::Denied => "Denied",
        };
        write!(f, "{}", s)
    }
}

/// Maps an accumulated score to its categorical verdict.
///
/// No normalization, decay, or weighting is applied; the score is the raw
/// running sum of chosen point values.
pub fn compute_verdict(score: i32) -> Verdict {
    if score >= GRANTED_THRESHOLD {
        Verdict::Granted
    } else if score >= PARTIALLY_GRANTED_THRESHOLD {
        Verdict::PartiallyGranted
    } else {
        Verdict::Denied
    }
}
