//! CaseScript aggregate - static authored definition of one hearing.
//!
//! Scripts are produced externally and treated as trusted input; the engine
//! only validates their structure once at load time. A script that passes
//! [`CaseScript::validate`] is playable: every defensive check the runtime
//! would otherwise need lives here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{CaseScriptId, DomainError, ErrorCode};

use super::turn::Turn;

/// Perspective variant of a case script.
///
/// The same case can be authored for the lawyer's bench or the judge's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    #[default]
    Lawyer,
    Judge,
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseMode::Lawyer => "lawyer",
            CaseMode::Judge => "judge",
        };
        write!(f, "{}", s)
    }
}

/// Static, authored definition of one hearing. Immutable once loaded.
///
/// # Invariants (after `validate`)
///
/// - `ordered_turns` is non-empty with strictly ascending, unique orders
/// - every decision turn carries at least one option
/// - option ids are unique within their turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseScript {
    id: CaseScriptId,
    title: String,
    area: String,
    theme: String,
    judge_name: String,
    opposing_counsel_name: String,
    opening_context: String,
    ordered_turns: Vec<Turn>,
    verdict_narrative_template: String,
    #[serde(default)]
    feedback_positives: Vec<String>,
    #[serde(default)]
    feedback_negatives: Vec<String>,
    #[serde(default)]
    feedback_suggestions: Vec<String>,
    #[serde(default)]
    related_article_refs: Vec<String>,
}

impl CaseScript {
    /// Creates a script from authored parts, validating its structure.
    ///
    /// # Errors
    ///
    /// - `MalformedCaseScript` on any structural violation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CaseScriptId,
        title: impl Into<String>,
        area: impl Into<String>,
        theme: impl Into<String>,
        judge_name: impl Into<String>,
        opposing_counsel_name: impl Into<String>,
        opening_context: impl Into<String>,
        ordered_turns: Vec<Turn>,
        verdict_narrative_template: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let script = Self {
            id,
            title: title.into(),
            area: area.into(),
            theme: theme.into(),
            judge_name: judge_name.into(),
            opposing_counsel_name: opposing_counsel_name.into(),
            opening_context: opening_context.into(),
            ordered_turns,
            verdict_narrative_template: verdict_narrative_template.into(),
            feedback_positives: Vec::new(),
            feedback_negatives: Vec::new(),
            feedback_suggestions: Vec::new(),
            related_article_refs: Vec::new(),
        };
        script.validate()?;
        Ok(script)
    }

    /// Sets the authored feedback lists.
    pub fn with_feedback(
        mut self,
        positives: Vec<String>,
        negatives: Vec<String>,
        suggestions: Vec<String>,
    ) -> Self {
        self.feedback_positives = positives;
        self.feedback_negatives = negatives;
        self.feedback_suggestions = suggestions;
        self
    }

    /// Sets the related article references.
    pub fn with_related_articles(mut self, refs: Vec<String>) -> Self {
        self.related_article_refs = refs;
        self
    }

    /// Validates the structure of a loaded script.
    ///
    /// Adapters that deserialize scripts directly must call this before
    /// handing the script to the engine.
    ///
    /// # Errors
    ///
    /// - `MalformedCaseScript` if the script is empty, turn orders are not
    ///   strictly ascending, a decision turn has no options, a narration
    ///   turn carries options, or option ids repeat within a turn
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(malformed("Script title is empty"));
        }
        if self.ordered_turns.is_empty() {
            return Err(malformed("Script has no turns"));
        }

        let mut previous_order: Option<u32> = None;
        for turn in &self.ordered_turns {
            if let Some(prev) = previous_order {
                if turn.order() <= prev {
                    return Err(malformed(format!(
                        "Turn orders must be strictly ascending: {} follows {}",
                        turn.order(),
                        prev
                    )));
                }
            }
            previous_order = Some(turn.order());

            if turn.turn_type().is_decision() && turn.options().is_empty() {
                return Err(malformed(format!(
                    "Decision turn {} has an empty options list",
                    turn.order()
                )));
            }
            if turn.turn_type().is_narration() && !turn.options().is_empty() {
                return Err(malformed(format!(
                    "Narration turn {} carries options",
                    turn.order()
                )));
            }

            let mut seen = HashSet::new();
            for option in turn.options() {
                if !seen.insert(option.id().as_str()) {
                    return Err(malformed(format!(
                        "Turn {} repeats option id '{}'",
                        turn.order(),
                        option.id()
                    )));
                }
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the script id.
    pub fn id(&self) -> &CaseScriptId {
        &self.id
    }

    /// Returns the case title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the legal area (e.g. "criminal", "civil").
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Returns the case theme within the area.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Returns the presiding judge's display name.
    pub fn judge_name(&self) -> &str {
        &self.judge_name
    }

    /// Returns the opposing counsel's display name.
    pub fn opposing_counsel_name(&self) -> &str {
        &self.opposing_counsel_name
    }

    /// Returns the opening context shown when a session starts.
    pub fn opening_context(&self) -> &str {
        &self.opening_context
    }

    /// Returns the turns in play order.
    pub fn ordered_turns(&self) -> &[Turn] {
        &self.ordered_turns
    }

    /// Returns the number of turns.
    pub fn turn_count(&self) -> usize {
        self.ordered_turns.len()
    }

    /// Returns the turn at a 0-based play index, if in range.
    pub fn turn_at(&self, index: usize) -> Option<&Turn> {
        self.ordered_turns.get(index)
    }

    /// Returns the verdict narrative template
    /// (`{verdict}` / `{score}` placeholders).
    pub fn verdict_narrative_template(&self) -> &str {
        &self.verdict_narrative_template
    }

    /// Returns the authored "what went well" feedback lines.
    pub fn feedback_positives(&self) -> &[String] {
        &self.feedback_positives
    }

    /// Returns the authored "what to improve" feedback lines.
    pub fn feedback_negatives(&self) -> &[String] {
        &self.feedback_negatives
    }

    /// Returns the authored study suggestions.
    pub fn feedback_suggestions(&self) -> &[String] {
        &self.feedback_suggestions
    }

    /// Returns the related article references.
    pub fn related_article_refs(&self) -> &[String] {
        &self.related_article_refs
    }
}

fn malformed(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::MalformedCaseScript, message)
}
