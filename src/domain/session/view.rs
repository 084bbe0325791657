//! Presentation snapshot emitted at the UI boundary.
//!
//! The UI subscribes to these snapshots and sends back intents
//! (`submit_choice`, `advance`); it never owns gameplay truth.

use serde::Serialize;

use crate::domain::case_script::{CaseScript, ChoiceOption};

use super::aggregate::Session;
use super::message::Message;
use super::status::SessionStatus;
use super::verdict::Verdict;

/// Read-only snapshot of a session for display.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub messages: Vec<Message>,
    /// Options awaiting a decision; `None` while narrating or concluded.
    pub pending_options: Option<Vec<ChoiceOption>>,
    pub score: i32,
    pub status: SessionStatus,
    pub verdict: Option<Verdict>,
    /// Elapsed seconds since the session started. Display only.
    pub elapsed_secs: i64,
}

impl SessionView {
    /// Builds a snapshot of the session against its script.
    pub fn of(session: &Session, script: &CaseScript) -> Self {
        Self {
            session_id: session.id().to_string(),
            messages: session.message_log().to_vec(),
            pending_options: session.pending_options(script).map(|opts| opts.to_vec()),
            score: session.score(),
            status: session.status(),
            verdict: session.verdict(),
            elapsed_secs: session.elapsed().num_seconds(),
        }
    }
}
