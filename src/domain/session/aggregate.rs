//! Session aggregate - one player's live progress through a case script.
//!
//! The session owns all gameplay truth: the turn cursor, the score, the
//! transcript, and the choice history. Turns are consumed strictly in script
//! order; branching happens only inside a decision turn via the chosen
//! option. Narration turns are drained automatically whenever the cursor
//! passes through them, so a session at rest is either waiting on a decision
//! turn or concluded.
//!
//! # Invariants
//!
//! - `0 <= current_turn_index <= script.turn_count()`
//! - `message_log` and `choice_history` only grow, never shrink or reorder
//! - `score` is the exact running sum of recorded point values, unclamped
//! - once `status` is Concluded the verdict is set and the session is
//!   read-only

use serde::{Deserialize, Serialize};

use crate::domain::case_script::{CaseMode, CaseScript, ChoiceOption, Turn};
use crate::domain::foundation::{CaseScriptId, OptionId, SessionId, Timestamp};

use super::choice::ChoiceRecord;
use super::errors::SimulationError;
use super::message::{Message, Speaker};
use super::status::SessionStatus;
use super::verdict::{compute_verdict, Verdict};

/// One live or concluded playthrough of a case script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    case_script_id: CaseScriptId,
    mode: CaseMode,
    current_turn_index: usize,
    score: i32,
    status: SessionStatus,
    verdict: Option<Verdict>,
    message_log: Vec<Message>,
    choice_history: Vec<ChoiceRecord>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Starts a new session over a validated script.
    ///
    /// Emits the opening-context message, then drains any leading narration
    /// turns so the session rests on the first decision turn (or concludes
    /// outright for an all-narration script).
    pub fn start(script: &CaseScript, mode: CaseMode) -> Self {
        let now = Timestamp::now();
        let mut session = Self {
            id: SessionId::new(),
            case_script_id: script.id().clone(),
            mode,
            current_turn_index: 0,
            score: 0,
            status: SessionStatus::InProgress,
            verdict: None,
            message_log: Vec::new(),
            choice_history: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        if !script.opening_context().trim().is_empty() {
            session.append_message(Speaker::System, script.opening_context());
        }
        session.play_narration(script);
        session
    }

    /// Reconstitutes a session from persistence (no validation).
    ///
    /// Callers on the resume path must follow up with
    /// [`Session::validate_against`].
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        case_script_id: CaseScriptId,
        mode: CaseMode,
        current_turn_index: usize,
        score: i32,
        status: SessionStatus,
        verdict: Option<Verdict>,
        message_log: Vec<Message>,
        choice_history: Vec<ChoiceRecord>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            case_script_id,
            mode,
            current_turn_index,
            score,
            status,
            verdict,
            message_log,
            choice_history,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the id of the script this session plays.
    pub fn case_script_id(&self) -> &CaseScriptId {
        &self.case_script_id
    }

    /// Returns the perspective variant being played.
    pub fn mode(&self) -> CaseMode {
        self.mode
    }

    /// Returns the 0-based turn cursor.
    pub fn current_turn_index(&self) -> usize {
        self.current_turn_index
    }

    /// Returns the running score (unclamped).
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the verdict, set exactly once at conclusion.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Returns the transcript in emission order.
    pub fn message_log(&self) -> &[Message] {
        &self.message_log
    }

    /// Returns the accepted choices in play order.
    pub fn choice_history(&self) -> &[ChoiceRecord] {
        &self.choice_history
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last mutated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true once the verdict has been computed and frozen.
    pub fn is_concluded(&self) -> bool {
        self.status == SessionStatus::Concluded
    }

    /// Elapsed wall-clock time since the session started.
    ///
    /// Informational only; no time limit is enforced.
    pub fn elapsed(&self) -> chrono::Duration {
        Timestamp::now().duration_since(&self.created_at)
    }

    /// Returns the turn the cursor currently points at, if any.
    pub fn current_turn<'a>(&self, script: &'a CaseScript) -> Option<&'a Turn> {
        script.turn_at(self.current_turn_index)
    }

    /// Returns the options awaiting a decision, or `None` when the session
    /// is concluded or resting on a narration turn.
    pub fn pending_options<'a>(&self, script: &'a CaseScript) -> Option<&'a [ChoiceOption]> {
        if self.is_concluded() {
            return None;
        }
        self.current_turn(script)
            .filter(|turn| turn.turn_type().is_decision())
            .map(|turn| turn.options())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a player decision to the current turn.
    ///
    /// On success: appends the PlayerLawyer message and choice record, adds
    /// the option's point value to the score, appends the scripted rebuttal
    /// (if any), advances the cursor, and drains trailing narration turns.
    /// Concludes the session once the cursor passes the final turn.
    ///
    /// # Errors
    ///
    /// - `SessionConcluded` if the session is read-only
    /// - `InvalidChoice` if the current turn is not a decision turn or the
    ///   option id is foreign to it; the session is left unchanged
    pub fn submit_choice(
        &mut self,
        script: &CaseScript,
        option_id: &OptionId,
    ) -> Result<(), SimulationError> {
        if !self.status.is_mutable() {
            return Err(SimulationError::SessionConcluded(self.id));
        }

        let turn = self
            .current_turn(script)
            .ok_or_else(|| SimulationError::corrupt("Session is in progress past the final turn"))?;

        if !turn.turn_type().is_decision() {
            return Err(SimulationError::invalid_choice(format!(
                "Turn {} is {}; a choice is not expected here",
                self.current_turn_index,
                turn.turn_type()
            )));
        }

        let option = turn.option(option_id).ok_or_else(|| {
            SimulationError::invalid_choice(format!(
                "Option '{}' is not among the current turn's options",
                option_id
            ))
        })?;

        // All checks passed; every mutation below is infallible.
        let turn_index = self.current_turn_index;
        self.append_message(Speaker::PlayerLawyer, option.text());
        self.choice_history
            .push(ChoiceRecord::from_option(turn_index, option));
        self.score += option.point_value();

        if let Some(rebuttal) = option.rebuttal_text() {
            self.append_message(Speaker::OpposingCounsel, rebuttal);
        }

        self.current_turn_index += 1;
        if self.current_turn_index == script.turn_count() {
            self.conclude();
        } else {
            self.play_narration(script);
        }
        self.touch();
        Ok(())
    }

    /// Acknowledges a narration turn and advances past it.
    ///
    /// Sessions at rest normally sit on decision turns because narration is
    /// drained during start and submit; this operation exists for snapshots
    /// persisted mid-narration by older writers. It drains any narration
    /// that follows.
    ///
    /// # Errors
    ///
    /// - `SessionConcluded` if the session is read-only
    /// - `InvalidChoice` if the current turn is a decision turn
    pub fn advance(&mut self, script: &CaseScript) -> Result<(), SimulationError> {
        if !self.status.is_mutable() {
            return Err(SimulationError::SessionConcluded(self.id));
        }

        let turn = self
            .current_turn(script)
            .ok_or_else(|| SimulationError::corrupt("Session is in progress past the final turn"))?;

        if turn.turn_type().is_decision() {
            return Err(SimulationError::invalid_choice(format!(
                "Turn {} requires a choice and cannot be skipped",
                self.current_turn_index
            )));
        }

        self.advance_step(script);
        self.play_narration(script);
        self.touch();
        Ok(())
    }

    /// Revalidates a reconstituted session against its script.
    ///
    /// # Errors
    ///
    /// - `CorruptSession` on any invariant violation
    pub fn validate_against(&self, script: &CaseScript) -> Result<(), SimulationError> {
        if script.id() != &self.case_script_id {
            return Err(SimulationError::corrupt(format!(
                "Snapshot references script '{}' but '{}' was loaded",
                self.case_script_id,
                script.id()
            )));
        }
        if self.current_turn_index > script.turn_count() {
            return Err(SimulationError::corrupt(format!(
                "Turn index {} exceeds script length {}",
                self.current_turn_index,
                script.turn_count()
            )));
        }
        match self.status {
            SessionStatus::Concluded => {
                let expected = compute_verdict(self.score);
                if self.verdict != Some(expected) {
                    return Err(SimulationError::corrupt(
                        "Concluded session verdict does not match its score",
                    ));
                }
            }
            SessionStatus::InProgress => {
                if self.verdict.is_some() {
                    return Err(SimulationError::corrupt(
                        "In-progress session carries a verdict",
                    ));
                }
                if self.current_turn_index == script.turn_count() {
                    return Err(SimulationError::corrupt(
                        "In-progress session is past the final turn",
                    ));
                }
            }
        }

        let expected_score: i32 = self
            .choice_history
            .iter()
            .map(ChoiceRecord::point_value)
            .sum();
        if self.score != expected_score {
            return Err(SimulationError::corrupt(format!(
                "Score {} does not equal the recorded sum {}",
                self.score, expected_score
            )));
        }

        if self.message_log.len() < self.choice_history.len() {
            return Err(SimulationError::corrupt(
                "Message log is shorter than the choice history",
            ));
        }
        for (i, message) in self.message_log.iter().enumerate() {
            if message.sequence_number() != i as u64 {
                return Err(SimulationError::corrupt(format!(
                    "Message sequence {} found at log position {}",
                    message.sequence_number(),
                    i
                )));
            }
        }

        let mut previous_turn: Option<usize> = None;
        for record in &self.choice_history {
            if record.turn_index() >= self.current_turn_index {
                return Err(SimulationError::corrupt(
                    "Choice history references an unplayed turn",
                ));
            }
            if let Some(prev) = previous_turn {
                if record.turn_index() <= prev {
                    return Err(SimulationError::corrupt(
                        "Choice history is not in ascending turn order",
                    ));
                }
            }
            previous_turn = Some(record.turn_index());

            let referenced = script.turn_at(record.turn_index()).ok_or_else(|| {
                SimulationError::corrupt("Choice history references a turn outside the script")
            })?;
            if !referenced.turn_type().is_decision() {
                return Err(SimulationError::corrupt(
                    "Choice history references a narration turn",
                ));
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a whole message atomically, assigning the next sequence slot.
    fn append_message(&mut self, speaker: Speaker, text: &str) {
        let sequence = self.message_log.len() as u64;
        self.message_log.push(Message::new(speaker, text, sequence));
    }

    /// Consumes one narration turn: emits its message and moves the cursor.
    fn advance_step(&mut self, script: &CaseScript) {
        if let Some(turn) = self.current_turn(script) {
            let text = turn.prompt_text().to_string();
            self.append_message(Speaker::Judge, &text);
        }
        self.current_turn_index += 1;
        if self.current_turn_index == script.turn_count() {
            self.conclude();
        }
    }

    /// Drains consecutive narration turns until a decision turn or the end.
    fn play_narration(&mut self, script: &CaseScript) {
        while self.status.is_mutable() {
            match self.current_turn(script) {
                Some(turn) if turn.turn_type().is_narration() => self.advance_step(script),
                _ => break,
            }
        }
    }

    /// Computes the verdict exactly once and freezes the session.
    fn conclude(&mut self) {
        debug_assert!(self.verdict.is_none());
        self.verdict = Some(compute_verdict(self.score));
        self.status = SessionStatus::Concluded;
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
