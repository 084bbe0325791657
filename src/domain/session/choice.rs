//! ChoiceRecord - append-only record of one accepted player decision.

use serde::{Deserialize, Serialize};

use crate::domain::case_script::{ChoiceOption, StrengthTag};
use crate::domain::foundation::OptionId;

/// One accepted decision, as recorded in the session history.
///
/// Records copy the option's scoring-relevant fields at decision time so the
/// history stays meaningful even if the script library changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    turn_index: usize,
    option_id: OptionId,
    text: String,
    point_value: i32,
    #[serde(default)]
    strength: Option<StrengthTag>,
    #[serde(default)]
    cited_article_refs: Vec<String>,
}

impl ChoiceRecord {
    /// Records the given option as chosen at `turn_index`.
    pub fn from_option(turn_index: usize, option: &ChoiceOption) -> Self {
        Self {
            turn_index,
            option_id: option.id().clone(),
            text: option.text().to_string(),
            point_value: option.point_value(),
            strength: option.strength(),
            cited_article_refs: option.cited_article_refs().to_vec(),
        }
    }

    /// Returns the 0-based index of the turn this choice answered.
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// Returns the chosen option's id.
    pub fn option_id(&self) -> &OptionId {
        &self.option_id
    }

    /// Returns the chosen option's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the signed score contribution of this choice.
    pub fn point_value(&self) -> i32 {
        self.point_value
    }

    /// Returns the authored strength tag, if any.
    pub fn strength(&self) -> Option<StrengthTag> {
        self.strength
    }

    /// Returns the article references cited by the chosen option.
    pub fn cited_article_refs(&self) -> &[String] {
        &self.cited_article_refs
    }

    /// Returns true if this choice improved the score.
    pub fn is_positive(&self) -> bool {
        self.point_value > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> ChoiceOption {
        ChoiceOption::new(OptionId::new("opt-a").unwrap(), "Cite article 5.", 10)
            .with_strength(StrengthTag::Strong)
            .with_cited_articles(vec!["art-5".to_string()])
    }

    #[test]
    fn from_option_copies_scoring_fields() {
        let record = ChoiceRecord::from_option(2, &option());
        assert_eq!(record.turn_index(), 2);
        assert_eq!(record.option_id().as_str(), "opt-a");
        assert_eq!(record.text(), "Cite article 5.");
        assert_eq!(record.point_value(), 10);
        assert_eq!(record.strength(), Some(StrengthTag::Strong));
        assert_eq!(record.cited_article_refs(), &["art-5".to_string()]);
    }

    #[test]
    fn positive_points_are_positive() {
        assert!(ChoiceRecord::from_option(0, &option()).is_positive());
    }

    #[test]
    fn zero_points_are_not_positive() {
        let zero = ChoiceOption::new(OptionId::new("z").unwrap(), "Say nothing.", 0);
        assert!(!ChoiceRecord::from_option(0, &zero).is_positive());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = ChoiceRecord::from_option(1, &option());
        let json = serde_json::to_string(&record).unwrap();
        let back: ChoiceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
