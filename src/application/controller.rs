//! SessionController - owner of the live session state.
//!
//! One controller drives one player's hearing at a time (single logical
//! writer per session). All business rules live here and in the session
//! aggregate; the UI is a pure subscriber of [`SessionView`] snapshots and
//! sends back intents. Mutations are applied synchronously in memory, then
//! persisted by a fire-and-forget snapshot write that never blocks the next
//! transition.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::sync::{spawn_snapshot_write, SyncMonitor};
use crate::domain::case_script::{CaseMode, CaseScript};
use crate::domain::foundation::{CaseScriptId, OptionId, SessionId};
use crate::domain::session::{Session, SessionView, SimulationError};
use crate::ports::{CaseScriptSource, SessionStore};

struct ActiveSession {
    script: CaseScript,
    session: Session,
}

/// Orchestrates session lifecycle over the script source and snapshot store.
pub struct SessionController {
    scripts: Arc<dyn CaseScriptSource>,
    store: Arc<dyn SessionStore>,
    sync: SyncMonitor,
    active: Option<ActiveSession>,
    pending_write: Option<JoinHandle<()>>,
}

impl SessionController {
    pub fn new(scripts: Arc<dyn CaseScriptSource>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            scripts,
            store,
            sync: SyncMonitor::new(),
            active: None,
            pending_write: None,
        }
    }

    /// Starts a new session over the given case script.
    ///
    /// Failures leave no partially-created session behind: the controller's
    /// active slot is only set once the script has been fetched and
    /// validated.
    ///
    /// # Errors
    ///
    /// - `CaseNotFound` if the script id is unknown
    /// - `MalformedCaseScript` if the script fails structural validation
    pub async fn start_session(
        &mut self,
        case_script_id: CaseScriptId,
        mode: CaseMode,
    ) -> Result<SessionView, SimulationError> {
        let script = self.load_script(&case_script_id, mode).await?;
        let session = Session::start(&script, mode);
        tracing::debug!(
            "Started session {} for case '{}' in {} mode",
            session.id(),
            case_script_id,
            mode
        );

        let view = SessionView::of(&session, &script);
        self.persist(session.clone());
        self.active = Some(ActiveSession { script, session });
        Ok(view)
    }

    /// Resumes a persisted session from its snapshot.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no snapshot exists for the id
    /// - `CorruptSession` if the snapshot is unreadable or violates an
    ///   invariant
    /// - `CaseNotFound` / `MalformedCaseScript` if the referenced script is
    ///   gone or no longer playable
    pub async fn resume_session(
        &mut self,
        session_id: SessionId,
    ) -> Result<SessionView, SimulationError> {
        let session = self
            .store
            .find_by_id(&session_id)
            .await?
            .ok_or(SimulationError::SessionNotFound(session_id))?;

        let script = self
            .load_script(session.case_script_id(), session.mode())
            .await?;
        session.validate_against(&script)?;
        tracing::debug!(
            "Resumed session {} at turn {} with score {}",
            session.id(),
            session.current_turn_index(),
            session.score()
        );

        let view = SessionView::of(&session, &script);
        self.active = Some(ActiveSession { script, session });
        Ok(view)
    }

    /// Applies a player decision to the current turn.
    ///
    /// The mutation happens synchronously; persistence is triggered in the
    /// background afterwards. Rejected choices leave the session unchanged.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if `session_id` is not the active session
    /// - `InvalidChoice` / `SessionConcluded` from the aggregate
    pub fn submit_choice(
        &mut self,
        session_id: SessionId,
        option_id: &OptionId,
    ) -> Result<SessionView, SimulationError> {
        let active = self.active_session(session_id)?;
        active.session.submit_choice(&active.script, option_id)?;

        let view = SessionView::of(&active.session, &active.script);
        let snapshot = active.session.clone();
        self.persist(snapshot);
        Ok(view)
    }

    /// Acknowledges a narration turn the session is resting on.
    ///
    /// Only reachable after resuming a snapshot persisted mid-narration;
    /// fresh sessions drain narration during start and submit.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if `session_id` is not the active session
    /// - `InvalidChoice` / `SessionConcluded` from the aggregate
    pub fn advance(&mut self, session_id: SessionId) -> Result<SessionView, SimulationError> {
        let active = self.active_session(session_id)?;
        active.session.advance(&active.script)?;

        let view = SessionView::of(&active.session, &active.script);
        let snapshot = active.session.clone();
        self.persist(snapshot);
        Ok(view)
    }

    /// Returns a presentation snapshot of the active session, if any.
    pub fn view(&self) -> Option<SessionView> {
        self.active
            .as_ref()
            .map(|active| SessionView::of(&active.session, &active.script))
    }

    /// Returns the active session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|active| &active.session)
    }

    /// Returns the script of the active session, if any.
    pub fn script(&self) -> Option<&CaseScript> {
        self.active.as_ref().map(|active| &active.script)
    }

    /// Returns the persistence sync monitor for this controller.
    pub fn sync_monitor(&self) -> &SyncMonitor {
        &self.sync
    }

    /// Waits for any in-flight snapshot write to settle.
    ///
    /// Used on graceful shutdown and in tests; gameplay never calls this.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending_write.take() {
            let _ = handle.await;
        }
    }

    fn active_session(
        &mut self,
        session_id: SessionId,
    ) -> Result<&mut ActiveSession, SimulationError> {
        match self.active.as_mut() {
            Some(active) if active.session.id() == &session_id => Ok(active),
            _ => Err(SimulationError::SessionNotFound(session_id)),
        }
    }

    async fn load_script(
        &self,
        id: &CaseScriptId,
        mode: CaseMode,
    ) -> Result<CaseScript, SimulationError> {
        let script = self
            .scripts
            .fetch(id, mode)
            .await?
            .ok_or_else(|| SimulationError::CaseNotFound(id.clone()))?;
        script
            .validate()
            .map_err(|err| SimulationError::malformed(err.message))?;
        Ok(script)
    }

    fn persist(&mut self, session: Session) {
        self.pending_write = Some(spawn_snapshot_write(
            self.pending_write.take(),
            Arc::clone(&self.store),
            session,
            self.sync.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::case_script::{ChoiceOption, StrengthTag, Turn, TurnType};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::session::SessionStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn opt(id: &str, points: i32) -> ChoiceOption {
        ChoiceOption::new(OptionId::new(id).unwrap(), format!("I argue {}.", id), points)
    }

    fn option_id(id: &str) -> OptionId {
        OptionId::new(id).unwrap()
    }

    fn case_id(id: &str) -> CaseScriptId {
        CaseScriptId::new(id).unwrap()
    }

    fn script() -> CaseScript {
        CaseScript::new(
            case_id("case-01"),
            "State v. Example",
            "criminal",
            "due process",
            "Judge Marden",
            "Counselor Reyes",
            "The defense moves to suppress.",
            vec![
                Turn::narration(0, TurnType::OpeningNarration, "Court is in session.").unwrap(),
                Turn::decision(
                    1,
                    TurnType::JudgeQuestion,
                    "Grounds?",
                    vec![
                        opt("a", 10).with_rebuttal("Counsel misreads the statute."),
                        opt("b", -10),
                    ],
                )
                .unwrap(),
                Turn::decision(
                    2,
                    TurnType::EvidencePresentation,
                    "Evidence?",
                    vec![opt("e1", 5).with_strength(StrengthTag::Medium)],
                )
                .unwrap(),
                Turn::narration(3, TurnType::ClosingNarration, "The court will deliberate.")
                    .unwrap(),
            ],
            "The motion is {verdict} with {score} points.",
        )
        .unwrap()
    }

    struct MockScriptSource {
        scripts: HashMap<String, CaseScript>,
    }

    impl MockScriptSource {
        fn with(script: CaseScript) -> Self {
            let mut scripts = HashMap::new();
            scripts.insert(script.id().as_str().to_string(), script);
            Self { scripts }
        }

        fn empty() -> Self {
            Self {
                scripts: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl CaseScriptSource for MockScriptSource {
        async fn fetch(
            &self,
            id: &CaseScriptId,
            _mode: CaseMode,
        ) -> Result<Option<CaseScript>, DomainError> {
            Ok(self.scripts.get(id.as_str()).cloned())
        }
    }

    #[derive(Default)]
    struct MockStore {
        snapshots: Mutex<HashMap<SessionId, Session>>,
        fail_writes: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                snapshots: Mutex::new(HashMap::new()),
                fail_writes: true,
            }
        }

        fn snapshot(&self, id: &SessionId) -> Option<Session> {
            self.snapshots.lock().unwrap().get(id).cloned()
        }
    }

    #[async_trait]
    impl SessionStore for MockStore {
        async fn upsert(&self, session: &Session) -> Result<(), DomainError> {
            if self.fail_writes {
                return Err(DomainError::new(
                    ErrorCode::PersistenceWrite,
                    "Simulated write failure",
                ));
            }
            self.snapshots
                .lock()
                .unwrap()
                .insert(*session.id(), session.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(self.snapshots.lock().unwrap().get(id).cloned())
        }

        async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
            self.snapshots.lock().unwrap().remove(id);
            Ok(())
        }
    }

    fn controller_with(
        source: MockScriptSource,
        store: Arc<MockStore>,
    ) -> SessionController {
        SessionController::new(Arc::new(source), store)
    }

    #[tokio::test]
    async fn start_session_rests_on_first_decision_turn() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store);

        let view = controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();

        assert_eq!(view.status, SessionStatus::InProgress);
        assert_eq!(view.pending_options.unwrap().len(), 2);
        assert_eq!(view.messages.len(), 2); // opening context + narration
    }

    #[tokio::test]
    async fn start_session_fails_closed_for_unknown_case() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::empty(), store.clone());

        let result = controller
            .start_session(case_id("missing"), CaseMode::Lawyer)
            .await;

        assert!(matches!(result, Err(SimulationError::CaseNotFound(_))));
        assert!(controller.session().is_none());
        assert!(store.snapshots.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn start_session_persists_an_initial_snapshot() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store.clone());

        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        controller.flush().await;

        let id = *controller.session().unwrap().id();
        assert!(store.snapshot(&id).is_some());
    }

    #[tokio::test]
    async fn submit_choice_mutates_and_persists() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store.clone());
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        let id = *controller.session().unwrap().id();

        let view = controller.submit_choice(id, &option_id("a")).unwrap();
        controller.flush().await;

        assert_eq!(view.score, 10);
        let persisted = store.snapshot(&id).unwrap();
        assert_eq!(persisted.score(), 10);
        assert_eq!(persisted.choice_history().len(), 1);
    }

    #[tokio::test]
    async fn submit_choice_with_wrong_session_id_is_rejected() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store);
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();

        let foreign = SessionId::new();
        let result = controller.submit_choice(foreign, &option_id("a"));
        assert!(matches!(result, Err(SimulationError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn rejected_choice_leaves_state_and_store_unchanged() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store.clone());
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        controller.flush().await;
        let id = *controller.session().unwrap().id();
        let before = controller.session().unwrap().clone();
        let persisted_before = store.snapshot(&id).unwrap();

        let result = controller.submit_choice(id, &option_id("nope"));

        assert!(matches!(result, Err(SimulationError::InvalidChoice { .. })));
        assert_eq!(controller.session().unwrap(), &before);
        assert_eq!(store.snapshot(&id).unwrap(), persisted_before);
    }

    #[tokio::test]
    async fn full_playthrough_concludes_and_persists_final_snapshot() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store.clone());
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        let id = *controller.session().unwrap().id();

        controller.submit_choice(id, &option_id("a")).unwrap();
        let view = controller.submit_choice(id, &option_id("e1")).unwrap();
        controller.flush().await;

        assert_eq!(view.status, SessionStatus::Concluded);
        assert!(view.verdict.is_some());
        let persisted = store.snapshot(&id).unwrap();
        assert!(persisted.is_concluded());
        assert_eq!(persisted.score(), 15);
    }

    #[tokio::test]
    async fn resume_reconstructs_identical_state() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store.clone());
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        let id = *controller.session().unwrap().id();
        controller.submit_choice(id, &option_id("a")).unwrap();
        let live = controller.session().unwrap().clone();
        controller.flush().await;

        let mut resumed_controller =
            controller_with(MockScriptSource::with(script()), store.clone());
        resumed_controller.resume_session(id).await.unwrap();

        let resumed = resumed_controller.session().unwrap();
        assert_eq!(resumed.score(), live.score());
        assert_eq!(resumed.message_log().len(), live.message_log().len());
        assert_eq!(resumed.choice_history().len(), live.choice_history().len());
        assert_eq!(resumed.current_turn_index(), live.current_turn_index());
    }

    #[tokio::test]
    async fn resume_of_unknown_session_fails() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store);

        let result = controller.resume_session(SessionId::new()).await;
        assert!(matches!(result, Err(SimulationError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn resume_of_tampered_snapshot_is_corrupt() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store.clone());
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        let id = *controller.session().unwrap().id();
        controller.submit_choice(id, &option_id("a")).unwrap();
        controller.flush().await;

        // Tamper with the stored score so it no longer matches the history.
        {
            let mut snapshots = store.snapshots.lock().unwrap();
            let good = snapshots.get(&id).unwrap().clone();
            let bad = Session::reconstitute(
                *good.id(),
                good.case_script_id().clone(),
                good.mode(),
                good.current_turn_index(),
                good.score() + 99,
                good.status(),
                good.verdict(),
                good.message_log().to_vec(),
                good.choice_history().to_vec(),
                *good.created_at(),
                *good.updated_at(),
            );
            snapshots.insert(id, bad);
        }

        let mut resumed_controller = controller_with(MockScriptSource::with(script()), store);
        let result = resumed_controller.resume_session(id).await;
        assert!(matches!(result, Err(SimulationError::CorruptSession { .. })));
    }

    #[tokio::test]
    async fn write_failure_flags_unsynced_but_play_continues() {
        let store = Arc::new(MockStore::failing());
        let mut controller = controller_with(MockScriptSource::with(script()), store);
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        let id = *controller.session().unwrap().id();

        controller.submit_choice(id, &option_id("a")).unwrap();
        controller.flush().await;

        assert!(!controller.sync_monitor().is_synced());
        // The live session still accepts the next decision.
        let view = controller.submit_choice(id, &option_id("e1")).unwrap();
        assert_eq!(view.score, 15);
    }

    #[tokio::test]
    async fn advance_is_rejected_on_decision_turns() {
        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(script()), store);
        controller
            .start_session(case_id("case-01"), CaseMode::Lawyer)
            .await
            .unwrap();
        let id = *controller.session().unwrap().id();

        let result = controller.advance(id);
        assert!(matches!(result, Err(SimulationError::InvalidChoice { .. })));
    }

    #[tokio::test]
    async fn malformed_script_fails_start_without_partial_session() {
        // Deserialized script with an optionless decision turn.
        let json = r#"{
            "id": "broken-case",
            "title": "Broken",
            "area": "criminal",
            "theme": "due process",
            "judge_name": "Judge Marden",
            "opposing_counsel_name": "Counselor Reyes",
            "opening_context": "Context.",
            "ordered_turns": [
                {"order": 0, "turn_type": "judge_question", "prompt_text": "?", "options": []}
            ],
            "verdict_narrative_template": "Ruling: {verdict}"
        }"#;
        let broken: CaseScript = serde_json::from_str(json).unwrap();

        let store = Arc::new(MockStore::new());
        let mut controller = controller_with(MockScriptSource::with(broken), store.clone());

        let result = controller
            .start_session(case_id("broken-case"), CaseMode::Lawyer)
            .await;

        assert!(matches!(
            result,
            Err(SimulationError::MalformedCaseScript { .. })
        ));
        assert!(controller.session().is_none());
        assert!(store.snapshots.lock().unwrap().is_empty());
    }
}
