//! Quest Definition Structures
//!
//! These structures are deserialized from TOML quest files.

use serde::Deserialize;

use crate::error::QuestError;

use super::state::QuestStep;

/// Level threshold used when a quest file does not set one
pub const DEFAULT_LEVEL_REQUIRED: i32 = 45;

/// A quest definition loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestFile {
    pub quest: RawQuest,
}

/// Raw quest data as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuest {
    pub id: String,
    pub name: String,
    /// Reward family; also the keyword the scholar listens for
    pub artifact_id: String,
    #[serde(default = "default_level_required")]
    pub level_required: i32,
    #[serde(default)]
    pub descriptions: RawStepDescriptions,
    pub dialogue: RawQuestDialogue,
}

fn default_level_required() -> i32 {
    DEFAULT_LEVEL_REQUIRED
}

/// Journal text shown for each step
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStepDescriptions {
    pub awaiting_keyword: Option<String>,
    pub awaiting_book: Option<String>,
    pub finished: Option<String>,
}

/// Lines the scholar speaks. `{player}` is replaced with the player's name.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestDialogue {
    pub keyword_accepted: String,
    pub turn_in_complete: String,
}

// ============================================================================
// Resolved Quest Structures (after parsing)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct StepDescriptions {
    pub awaiting_keyword: Option<String>,
    pub awaiting_book: Option<String>,
    pub finished: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuestDialogue {
    /// Spoken when the keyword is whispered at the first step
    pub keyword_accepted: String,
    /// Spoken when the book is accepted and the reward granted
    pub turn_in_complete: String,
}

impl QuestDialogue {
    pub fn keyword_accepted_for(&self, player_name: &str) -> String {
        render(&self.keyword_accepted, player_name)
    }

    pub fn turn_in_complete_for(&self, player_name: &str) -> String {
        render(&self.turn_in_complete, player_name)
    }
}

fn render(template: &str, player_name: &str) -> String {
    template.replace("{player}", player_name)
}

/// A fully resolved turn-in quest definition
#[derive(Debug, Clone)]
pub struct TurnInQuestDefinition {
    pub id: String,
    /// Quest name, not necessarily the reward's name
    pub name: String,
    pub artifact_id: String,
    pub level_required: i32,
    pub descriptions: StepDescriptions,
    pub dialogue: QuestDialogue,
}

impl TurnInQuestDefinition {
    /// Create a definition from raw TOML data
    pub fn from_raw(raw: &RawQuest) -> Result<Self, QuestError> {
        if raw.id.trim().is_empty() {
            return Err(QuestError::invalid(&raw.name, "quest id is empty"));
        }
        if raw.artifact_id.trim().is_empty() {
            return Err(QuestError::invalid(&raw.id, "artifact_id is empty"));
        }
        if raw.level_required < 1 {
            return Err(QuestError::invalid(
                &raw.id,
                format!("level_required must be positive, got {}", raw.level_required),
            ));
        }

        Ok(Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            artifact_id: raw.artifact_id.clone(),
            level_required: raw.level_required,
            descriptions: StepDescriptions {
                awaiting_keyword: raw.descriptions.awaiting_keyword.clone(),
                awaiting_book: raw.descriptions.awaiting_book.clone(),
                finished: raw.descriptions.finished.clone(),
            },
            dialogue: QuestDialogue {
                keyword_accepted: raw.dialogue.keyword_accepted.clone(),
                turn_in_complete: raw.dialogue.turn_in_complete.clone(),
            },
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, QuestError> {
        let raw: RawQuestFile = toml::from_str(content)
            .map_err(|e| QuestError::toml("<inline>", e))?;
        Self::from_raw(&raw.quest)
    }

    /// Journal text for a step, falling back to the quest name
    pub fn description(&self, step: QuestStep) -> &str {
        let text = match step {
            QuestStep::AwaitingKeyword => self.descriptions.awaiting_keyword.as_deref(),
            QuestStep::AwaitingBook => self.descriptions.awaiting_book.as_deref(),
            QuestStep::Finished => self.descriptions.finished.as_deref(),
            QuestStep::NotStarted => None,
        };
        text.unwrap_or(&self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const BAND_OF_STARS_QUEST: &str = r#"
        [quest]
        id = "band_of_stars"
        name = "Band of Stars"
        artifact_id = "Band of Stars"
        level_required = 45

        [quest.descriptions]
        awaiting_keyword = "Defeat Chisisi."
        awaiting_book = "Turn in the King's Vase."

        [quest.dialogue]
        keyword_accepted = "Give me the King's Vase and I shall examine it."
        turn_in_complete = "May the Band of Stars guide you, {player}."
    "#;

    #[test]
    fn test_parse_definition() {
        let def = TurnInQuestDefinition::from_toml_str(BAND_OF_STARS_QUEST).unwrap();
        assert_eq!(def.id, "band_of_stars");
        assert_eq!(def.artifact_id, "Band of Stars");
        assert_eq!(def.level_required, 45);
        assert_eq!(def.description(QuestStep::AwaitingKeyword), "Defeat Chisisi.");
        assert_eq!(def.description(QuestStep::Finished), "Band of Stars");
        assert_eq!(
            def.dialogue.turn_in_complete_for("Aredhel"),
            "May the Band of Stars guide you, Aredhel."
        );
    }

    #[test]
    fn test_level_defaults_to_45() {
        let def = TurnInQuestDefinition::from_toml_str(
            r#"
            [quest]
            id = "q"
            name = "Q"
            artifact_id = "A"
            [quest.dialogue]
            keyword_accepted = "k"
            turn_in_complete = "t"
            "#,
        )
        .unwrap();
        assert_eq!(def.level_required, DEFAULT_LEVEL_REQUIRED);
    }

    #[test]
    fn test_empty_artifact_rejected() {
        let result = TurnInQuestDefinition::from_toml_str(
            r#"
            [quest]
            id = "q"
            name = "Q"
            artifact_id = " "
            [quest.dialogue]
            keyword_accepted = "k"
            turn_in_complete = "t"
            "#,
        );
        assert!(matches!(result, Err(QuestError::InvalidDefinition { .. })));
    }
}
