//! Turn and option types for authored case scripts.
//!
//! A turn is one scripted unit of the hearing: either narration delivered by
//! the bench or a decision point where the player picks a response or an
//! evidence item.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, OptionId};

/// The four turn types of a scripted hearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnType {
    OpeningNarration,
    JudgeQuestion,
    EvidencePresentation,
    ClosingNarration,
}

impl TurnType {
    /// Returns true if this turn blocks on a player choice.
    pub fn is_decision(&self) -> bool {
        matches!(self, TurnType::JudgeQuestion | TurnType::EvidencePresentation)
    }

    /// Returns true if this turn is consumed by acknowledgment only.
    pub fn is_narration(&self) -> bool {
        !self.is_decision()
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnType::OpeningNarration => "OpeningNarration",
            TurnType::JudgeQuestion => "JudgeQuestion",
            TurnType::EvidencePresentation => "EvidencePresentation",
            TurnType::ClosingNarration => "ClosingNarration",
        };
        write!(f, "{}", s)
    }
}

/// Authored strength rating of an evidence item or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTag {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrengthTag::Weak => "weak",
            StrengthTag::Medium => "medium",
            StrengthTag::Strong => "strong",
        };
        write!(f, "{}", s)
    }
}

/// One selectable response or evidence item within a decision turn.
///
/// # Invariants
///
/// - `id` is unique within its turn (enforced by script validation)
/// - `point_value` is signed and applied to the session score unclamped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    id: OptionId,
    text: String,
    point_value: i32,
    #[serde(default)]
    strength: Option<StrengthTag>,
    #[serde(default)]
    rebuttal_text: Option<String>,
    #[serde(default)]
    cited_article_refs: Vec<String>,
}

impl ChoiceOption {
    /// Creates a new option.
    pub fn new(id: OptionId, text: impl Into<String>, point_value: i32) -> Self {
        Self {
            id,
            text: text.into(),
            point_value,
            strength: None,
            rebuttal_text: None,
            cited_article_refs: Vec::new(),
        }
    }

    /// Sets the authored strength tag.
    pub fn with_strength(mut self, strength: StrengthTag) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Sets the opposing counsel's scripted rebuttal.
    pub fn with_rebuttal(mut self, rebuttal: impl Into<String>) -> Self {
        self.rebuttal_text = Some(rebuttal.into());
        self
    }

    /// Sets the cited article references.
    pub fn with_cited_articles(mut self, refs: Vec<String>) -> Self {
        self.cited_article_refs = refs;
        self
    }

    /// Returns the option id.
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    /// Returns the option text as spoken by the player.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the signed score contribution.
    pub fn point_value(&self) -> i32 {
        self.point_value
    }

    /// Returns the authored strength tag, if any.
    pub fn strength(&self) -> Option<StrengthTag> {
        self.strength
    }

    /// Returns the scripted rebuttal, if any.
    pub fn rebuttal_text(&self) -> Option<&str> {
        self.rebuttal_text.as_deref()
    }

    /// Returns the cited article references.
    pub fn cited_article_refs(&self) -> &[String] {
        &self.cited_article_refs
    }
}

/// One scripted unit of the hearing.
///
/// # Invariants
///
/// - narration turns carry no options
/// - decision turns carry at least one option (enforced by script validation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    order: u32,
    turn_type: TurnType,
    prompt_text: String,
    #[serde(default)]
    options: Vec<ChoiceOption>,
}

impl Turn {
    /// Creates a narration turn.
    ///
    /// # Errors
    ///
    /// - `MalformedCaseScript` if `turn_type` is a decision type
    pub fn narration(
        order: u32,
        turn_type: TurnType,
        prompt_text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if turn_type.is_decision() {
            return Err(DomainError::new(
                ErrorCode::MalformedCaseScript,
                format!("Turn {} is a decision type but has no options", order),
            ));
        }
        Ok(Self {
            order,
            turn_type,
            prompt_text: prompt_text.into(),
            options: Vec::new(),
        })
    }

    /// Creates a decision turn.
    ///
    /// # Errors
    ///
    /// - `MalformedCaseScript` if `turn_type` is a narration type or
    ///   `options` is empty
    pub fn decision(
        order: u32,
        turn_type: TurnType,
        prompt_text: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Result<Self, DomainError> {
        if turn_type.is_narration() {
            return Err(DomainError::new(
                ErrorCode::MalformedCaseScript,
                format!("Turn {} is a narration type but carries options", order),
            ));
        }
        if options.is_empty() {
            return Err(DomainError::new(
                ErrorCode::MalformedCaseScript,
                format!("Decision turn {} has an empty options list", order),
            ));
        }
        Ok(Self {
            order,
            turn_type,
            prompt_text: prompt_text.into(),
            options,
        })
    }

    /// Returns the authored order of this turn.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Returns the turn type.
    pub fn turn_type(&self) -> TurnType {
        self.turn_type
    }

    /// Returns the prompt text (narration body or question).
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    /// Returns the options of a decision turn (empty for narration).
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Finds an option of this turn by id.
    pub fn option(&self, id: &OptionId) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id() == id)
    }
}
