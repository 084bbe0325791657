//! End-to-end hearing flow over the file-based adapters.
//!
//! Plays full sessions through the controller with YAML scripts on disk and
//! JSON snapshots, the way the demo binary wires things up.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use tribuna::adapters::fs::{JsonSessionStore, YamlScriptSource};
use tribuna::adapters::memory::InMemoryStudyLibrary;
use tribuna::application::{GetFeedbackHandler, SessionController};
use tribuna::domain::case_script::{CaseMode, CaseScript, ChoiceOption, StrengthTag, Turn, TurnType};
use tribuna::domain::foundation::{CaseScriptId, OptionId, SessionId};
use tribuna::domain::session::{SessionStatus, SimulationError, Speaker, Verdict};
use tribuna::ports::{SessionStore, StudyLibrary};

fn suppression_case() -> CaseScript {
    CaseScript::new(
        CaseScriptId::new("suppression-01").unwrap(),
        "State v. Arantes",
        "criminal",
        "search and seizure",
        "Judge Marden",
        "Counselor Reyes",
        "The defense moves to suppress evidence seized without a warrant.",
        vec![
            Turn::narration(0, TurnType::OpeningNarration, "Court is now in session.").unwrap(),
            Turn::decision(
                1,
                TurnType::JudgeQuestion,
                "Counsel, on what grounds do you move to suppress?",
                vec![
                    ChoiceOption::new(
                        OptionId::new("a").unwrap(),
                        "The search violated the warrant requirement.",
                        10,
                    )
                    .with_rebuttal("Your honor, exigent circumstances applied."),
                    ChoiceOption::new(
                        OptionId::new("b").unwrap(),
                        "My client simply disagrees with the search.",
                        -10,
                    ),
                ],
            )
            .unwrap(),
            Turn::decision(
                2,
                TurnType::EvidencePresentation,
                "Present your supporting evidence.",
                vec![ChoiceOption::new(
                    OptionId::new("e1").unwrap(),
                    "I submit the incident report showing no warrant was issued.",
                    5,
                )
                .with_strength(StrengthTag::Medium)],
            )
            .unwrap(),
            Turn::narration(3, TurnType::ClosingNarration, "The court will deliberate.").unwrap(),
        ],
        "The motion is {verdict} with {score} points.",
    )
    .unwrap()
    .with_feedback(
        vec!["Clear constitutional grounding".to_string()],
        vec!["Evidence presentation could cite precedent".to_string()],
        vec!["Review the exclusionary rule".to_string()],
    )
}

fn write_script(dir: &Path, script: &CaseScript) {
    let yaml = serde_yaml::to_string(script).unwrap();
    std::fs::write(dir.join(format!("{}.yaml", script.id())), yaml).unwrap();
}

struct Harness {
    _dirs: (TempDir, TempDir),
    scripts: Arc<YamlScriptSource>,
    store: Arc<JsonSessionStore>,
}

impl Harness {
    fn new() -> Self {
        let script_dir = TempDir::new().unwrap();
        let snapshot_dir = TempDir::new().unwrap();
        write_script(script_dir.path(), &suppression_case());
        let scripts = Arc::new(YamlScriptSource::new(script_dir.path()));
        let store = Arc::new(JsonSessionStore::new(snapshot_dir.path()));
        Self {
            _dirs: (script_dir, snapshot_dir),
            scripts,
            store,
        }
    }

    fn controller(&self) -> SessionController {
        SessionController::new(self.scripts.clone(), self.store.clone())
    }
}

fn case_id() -> CaseScriptId {
    CaseScriptId::new("suppression-01").unwrap()
}

fn option_id(id: &str) -> OptionId {
    OptionId::new(id).unwrap()
}

#[tokio::test]
async fn full_hearing_produces_transcript_score_and_verdict() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    // Opening context + opening narration already in the log.
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.messages[0].speaker(), Speaker::System);
    assert_eq!(view.messages[1].speaker(), Speaker::Judge);
    assert_eq!(view.pending_options.as_ref().unwrap().len(), 2);

    let session_id: SessionId = view.session_id.parse().unwrap();

    let view = controller.submit_choice(session_id, &option_id("a")).unwrap();
    assert_eq!(view.score, 10);
    // Player argument + scripted rebuttal, then resting on the evidence turn.
    assert_eq!(view.messages[2].speaker(), Speaker::PlayerLawyer);
    assert_eq!(view.messages[3].speaker(), Speaker::OpposingCounsel);
    assert_eq!(view.pending_options.as_ref().unwrap().len(), 1);

    let view = controller.submit_choice(session_id, &option_id("e1")).unwrap();
    assert_eq!(view.status, SessionStatus::Concluded);
    assert_eq!(view.score, 15);
    assert_eq!(view.verdict, Some(Verdict::Denied));
    assert!(view.pending_options.is_none());
    // Closing narration was drained into the transcript.
    assert_eq!(view.messages.last().unwrap().speaker(), Speaker::Judge);

    controller.flush().await;
    assert!(controller.sync_monitor().is_synced());
}

#[tokio::test]
async fn snapshot_resume_restores_identical_state() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    let session_id: SessionId = view.session_id.parse().unwrap();
    controller.submit_choice(session_id, &option_id("a")).unwrap();
    let live = controller.session().unwrap().clone();
    controller.flush().await;
    drop(controller);

    let mut resumed = harness.controller();
    let view = resumed.resume_session(session_id).await.unwrap();

    assert_eq!(view.score, live.score());
    assert_eq!(view.messages.len(), live.message_log().len());
    let session = resumed.session().unwrap();
    assert_eq!(session.choice_history(), live.choice_history());
    assert_eq!(session.current_turn_index(), live.current_turn_index());

    // The resumed session plays on to a verdict.
    let view = resumed.submit_choice(session_id, &option_id("e1")).unwrap();
    assert_eq!(view.status, SessionStatus::Concluded);
    resumed.flush().await;
}

#[tokio::test]
async fn rejected_choice_changes_nothing_on_disk_or_in_memory() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    let session_id: SessionId = view.session_id.parse().unwrap();
    controller.flush().await;
    let before = controller.session().unwrap().clone();
    let on_disk = harness.store.find_by_id(&session_id).await.unwrap().unwrap();

    let result = controller.submit_choice(session_id, &option_id("not-an-option"));
    assert!(matches!(result, Err(SimulationError::InvalidChoice { .. })));
    controller.flush().await;

    assert_eq!(controller.session().unwrap(), &before);
    assert_eq!(
        harness.store.find_by_id(&session_id).await.unwrap().unwrap(),
        on_disk
    );
}

#[tokio::test]
async fn concluded_session_is_read_only() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    let session_id: SessionId = view.session_id.parse().unwrap();
    controller.submit_choice(session_id, &option_id("a")).unwrap();
    controller.submit_choice(session_id, &option_id("e1")).unwrap();

    let result = controller.submit_choice(session_id, &option_id("a"));
    assert!(matches!(result, Err(SimulationError::SessionConcluded(_))));
    controller.flush().await;
}

#[tokio::test]
async fn feedback_summarizes_the_concluded_hearing() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    let session_id: SessionId = view.session_id.parse().unwrap();
    controller.submit_choice(session_id, &option_id("b")).unwrap();
    controller.submit_choice(session_id, &option_id("e1")).unwrap();
    controller.flush().await;

    let library = Arc::new(InMemoryStudyLibrary::new());
    library.insert(
        "criminal",
        "search and seizure",
        tribuna::domain::feedback::StudyResource::new(
            "The Exclusionary Rule",
            tribuna::domain::feedback::ResourceKind::Reading,
            "reading-12",
        ),
    );
    let handler = GetFeedbackHandler::new(
        harness.scripts.clone(),
        harness.store.clone(),
        library as Arc<dyn StudyLibrary>,
    );

    let report = handler.execute(session_id).await.unwrap();
    assert_eq!(report.score(), -5);
    assert_eq!(report.verdict(), Verdict::Denied);
    assert_eq!(report.narrative(), "The motion is Denied with -5 points.");
    assert_eq!(report.strengths().len(), 1); // e1 (+5)
    assert_eq!(report.improvements().len(), 1); // b (-10)
    assert_eq!(report.recommended().len(), 1);
    assert_eq!(report.suggestions().len(), 1);
}

#[tokio::test]
async fn feedback_before_conclusion_is_refused() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    let session_id: SessionId = view.session_id.parse().unwrap();
    controller.flush().await;

    let handler = GetFeedbackHandler::new(
        harness.scripts.clone(),
        harness.store.clone(),
        Arc::new(InMemoryStudyLibrary::new()),
    );
    let result = handler.execute(session_id).await;
    assert!(matches!(result, Err(SimulationError::SessionInProgress(_))));
}

#[tokio::test]
async fn unknown_case_and_unknown_session_fail_cleanly() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let result = controller
        .start_session(CaseScriptId::new("no-such-case").unwrap(), CaseMode::Lawyer)
        .await;
    assert!(matches!(result, Err(SimulationError::CaseNotFound(_))));

    let result = controller.resume_session(SessionId::new()).await;
    assert!(matches!(result, Err(SimulationError::SessionNotFound(_))));
}

#[tokio::test]
async fn tampered_snapshot_is_rejected_on_resume() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    let view = controller
        .start_session(case_id(), CaseMode::Lawyer)
        .await
        .unwrap();
    let session_id: SessionId = view.session_id.parse().unwrap();
    controller.submit_choice(session_id, &option_id("a")).unwrap();
    controller.flush().await;

    // Corrupt the stored score so it disagrees with the choice history.
    let path = harness
        ._dirs
        .1
        .path()
        .join(format!("{}.json", session_id));
    let raw = std::fs::read_to_string(&path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["score"] = serde_json::json!(9999);
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let mut resumed = harness.controller();
    let result = resumed.resume_session(session_id).await;
    assert!(matches!(result, Err(SimulationError::CorruptSession { .. })));
}
