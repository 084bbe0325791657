//! Message entity for the session transcript.
//!
//! Messages record everything spoken during a hearing. They are committed to
//! the session's log atomically and as a whole; the dialogue typist paces
//! their display only and never sees a partial message.
//!
//! Unlike free-form user input, message text originates from validated case
//! scripts and the engine itself, so construction is infallible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is speaking in a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Judge,
    PlayerLawyer,
    OpposingCounsel,
    System,
}

impl Speaker {
    /// Returns true if the speaker is a scripted adversary.
    pub fn is_adversary(&self) -> bool {
        matches!(self, Speaker::OpposingCounsel)
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Speaker::Judge => "Judge",
            Speaker::PlayerLawyer => "PlayerLawyer",
            Speaker::OpposingCounsel => "OpposingCounsel",
            Speaker::System => "System",
        };
        write!(f, "{}", s)
    }
}

/// An immutable transcript message.
///
/// # Invariants
///
/// - `sequence_number` is dense and ascending within a session's log
/// - content never changes after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    speaker: Speaker,
    text: String,
    sequence_number: u64,
}

impl Message {
    /// Creates a new message. The sequence number is assigned by the owning
    /// session (the next slot in its log).
    pub fn new(speaker: Speaker, text: impl Into<String>, sequence_number: u64) -> Self {
        Self {
            speaker,
            text: text.into(),
            sequence_number,
        }
    }

    /// Returns the speaker.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the position of this message in the session log.
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }
}
