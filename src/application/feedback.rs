//! Feedback query - post-hoc report for a concluded session.
//!
//! Reads the persisted snapshot rather than any live controller state, so
//! feedback stays available after the player has moved on. The study library
//! is best-effort: a lookup failure degrades the report to the script's own
//! authored suggestions instead of failing the query.

use std::sync::Arc;

use crate::domain::feedback::FeedbackReport;
use crate::domain::foundation::SessionId;
use crate::domain::session::SimulationError;
use crate::ports::{CaseScriptSource, SessionStore, StudyLibrary};

/// Builds feedback reports from concluded session snapshots.
pub struct GetFeedbackHandler {
    scripts: Arc<dyn CaseScriptSource>,
    store: Arc<dyn SessionStore>,
    library: Arc<dyn StudyLibrary>,
}

impl GetFeedbackHandler {
    pub fn new(
        scripts: Arc<dyn CaseScriptSource>,
        store: Arc<dyn SessionStore>,
        library: Arc<dyn StudyLibrary>,
    ) -> Self {
        Self {
            scripts,
            store,
            library,
        }
    }

    /// Returns the feedback report for a concluded session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no snapshot exists for the id
    /// - `SessionInProgress` if the session has not concluded
    /// - `CaseNotFound` / `MalformedCaseScript` if the referenced script is
    ///   gone or unplayable
    /// - `CorruptSession` if the snapshot violates an invariant
    pub async fn execute(&self, session_id: SessionId) -> Result<FeedbackReport, SimulationError> {
        let session = self
            .store
            .find_by_id(&session_id)
            .await?
            .ok_or(SimulationError::SessionNotFound(session_id))?;

        let script = self
            .scripts
            .fetch(session.case_script_id(), session.mode())
            .await?
            .ok_or_else(|| SimulationError::CaseNotFound(session.case_script_id().clone()))?;
        script
            .validate()
            .map_err(|err| SimulationError::malformed(err.message))?;
        session.validate_against(&script)?;

        let recommended = match self.library.recommend(script.area(), script.theme()).await {
            Ok(resources) => resources,
            Err(err) => {
                tracing::warn!(
                    "Study library lookup failed for area '{}'; continuing without recommendations: {}",
                    script.area(),
                    err
                );
                Vec::new()
            }
        };

        FeedbackReport::build(&session, &script, recommended)
    }
}
