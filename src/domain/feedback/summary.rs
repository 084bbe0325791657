//! Feedback report built from a concluded session.
//!
//! Read-only summarization: the builder never mutates the session. Study
//! recommendations come from the external content library, queried by the
//! script's area and theme.

use serde::{Deserialize, Serialize};

use crate::domain::case_script::CaseScript;
use crate::domain::session::{ChoiceRecord, Session, SimulationError, Verdict};

/// Kind of recommended study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Reading,
    Video,
}

/// One recommended item from the study-content library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyResource {
    pub title: String,
    pub kind: ResourceKind,
    pub reference: String,
}

impl StudyResource {
    pub fn new(title: impl Into<String>, kind: ResourceKind, reference: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            reference: reference.into(),
        }
    }
}

/// Post-hoc summary of a concluded hearing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReport {
    score: i32,
    verdict: Verdict,
    narrative: String,
    choices: Vec<ChoiceRecord>,
    strengths: Vec<ChoiceRecord>,
    improvements: Vec<ChoiceRecord>,
    authored_positives: Vec<String>,
    authored_negatives: Vec<String>,
    suggestions: Vec<String>,
    related_article_refs: Vec<String>,
    recommended: Vec<StudyResource>,
}

impl FeedbackReport {
    /// Builds the report for a concluded session.
    ///
    /// # Errors
    ///
    /// - `SessionInProgress` if the session has no verdict yet
    pub fn build(
        session: &Session,
        script: &CaseScript,
        recommended: Vec<StudyResource>,
    ) -> Result<Self, SimulationError> {
        let verdict = match session.verdict() {
            Some(verdict) if session.is_concluded() => verdict,
            _ => return Err(SimulationError::SessionInProgress(*session.id())),
        };

        let choices = session.choice_history().to_vec();
        let (strengths, improvements): (Vec<_>, Vec<_>) =
            choices.iter().cloned().partition(ChoiceRecord::is_positive);

        Ok(Self {
            score: session.score(),
            verdict,
            narrative: render_narrative(
                script.verdict_narrative_template(),
                verdict,
                session.score(),
            ),
            choices,
            strengths,
            improvements,
            authored_positives: script.feedback_positives().to_vec(),
            authored_negatives: script.feedback_negatives().to_vec(),
            suggestions: script.feedback_suggestions().to_vec(),
            related_article_refs: script.related_article_refs().to_vec(),
            recommended,
        })
    }

    /// Returns the final score.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Returns the final verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns the rendered verdict narrative.
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Returns the full ordered choice history with strength tags.
    pub fn choices(&self) -> &[ChoiceRecord] {
        &self.choices
    }

    /// Returns choices that earned points ("what you did well").
    pub fn strengths(&self) -> &[ChoiceRecord] {
        &self.strengths
    }

    /// Returns choices that earned nothing or lost points ("what to improve").
    pub fn improvements(&self) -> &[ChoiceRecord] {
        &self.improvements
    }

    /// Returns the authored positive feedback lines.
    pub fn authored_positives(&self) -> &[String] {
        &self.authored_positives
    }

    /// Returns the authored negative feedback lines.
    pub fn authored_negatives(&self) -> &[String] {
        &self.authored_negatives
    }

    /// Returns the authored study suggestions.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Returns the script's related article references.
    pub fn related_article_refs(&self) -> &[String] {
        &self.related_article_refs
    }

    /// Returns the recommended study material.
    pub fn recommended(&self) -> &[StudyResource] {
        &self.recommended
    }
}

/// Renders the authored narrative template with the final outcome.
fn render_narrative(template: &str, verdict: Verdict, score: i32) -> String {
    template
        .replace("{verdict}", &verdict.to_string())
        .replace("{score}", &score.to_string())
}
