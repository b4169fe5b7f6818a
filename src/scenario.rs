//! Scripted interaction runs
//!
//! A scenario names one player, one NPC, the player's starting bags, and an
//! ordered list of whispers and handovers. It is run against the in-memory
//! collaborators.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::actor::{Actor, Npc, Player};
use crate::artifact::ArtifactLookup;
use crate::error::QuestError;
use crate::item::InventoryItem;
use crate::quest::{InteractionEvent, QuestDispatcher, QuestServices};
use crate::world::{Grant, InMemoryInventory, SpeechLog};

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioItem {
    pub template_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioAction {
    /// Whisper this text to the NPC
    Whisper(String),
    /// Hand the first item with this template id to the NPC
    Give(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Artifact ids of quests accepted before the first action
    #[serde(default)]
    pub accept: Vec<String>,
    #[serde(default)]
    pub inventory: Vec<ScenarioItem>,
    pub player: Player,
    pub npc: Npc,
    #[serde(default)]
    pub actions: Vec<ScenarioAction>,
}

#[derive(Debug, Default)]
pub struct ScenarioReport {
    /// Whether each action was handled, in order
    pub outcomes: Vec<(ScenarioAction, bool)>,
    pub grants: Vec<Grant>,
    pub lines_spoken: usize,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, QuestError> {
        let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;
        toml::from_str(&content).map_err(|e| QuestError::toml(path, e))
    }

    pub async fn run(
        &self,
        dispatcher: &QuestDispatcher,
        artifacts: &dyn ArtifactLookup,
    ) -> Result<ScenarioReport, QuestError> {
        let mut inventory = InMemoryInventory::new();
        let mut speech = SpeechLog::new();

        for item in &self.inventory {
            if !inventory.stock(&self.player.id, InventoryItem::new(&item.template_id, &item.name)) {
                warn!("No room for '{}' in {}'s inventory", item.name, self.player.name);
            }
        }

        for artifact_id in &self.accept {
            dispatcher.accept(&self.player, artifact_id).await?;
        }

        let player = Actor::Player(self.player.clone());
        let npc = Actor::Npc(self.npc.clone());
        let mut report = ScenarioReport::default();

        for action in &self.actions {
            let handled = match action {
                ScenarioAction::Whisper(text) => {
                    let event = InteractionEvent::Whisper {
                        from: &player,
                        to: &npc,
                        text: text.as_str(),
                    };
                    let mut services = QuestServices::new(artifacts, &mut inventory, &mut speech);
                    dispatcher.handle(event, &mut services).await
                }
                ScenarioAction::Give(template_id) => {
                    let item = inventory
                        .inventory(&self.player.id)
                        .and_then(|inv| inv.find_template(template_id))
                        .cloned();
                    match item {
                        Some(item) => {
                            let event = InteractionEvent::ItemOffered {
                                from: &player,
                                to: &npc,
                                item: &item,
                            };
                            let mut services =
                                QuestServices::new(artifacts, &mut inventory, &mut speech);
                            dispatcher.handle(event, &mut services).await
                        }
                        None => {
                            warn!("{} holds no '{}'", self.player.name, template_id);
                            false
                        }
                    }
                }
            };

            info!("{:?} -> handled: {}", action, handled);
            report.outcomes.push((action.clone(), handled));
        }

        report.grants = inventory.grants;
        report.lines_spoken = speech.lines.len();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::fixtures::{self, ARTIFACT};
    use crate::quest::QuestTypeRegistry;
    use std::sync::Arc;

    const RUN: &str = r#"
        accept = ["Band of Stars"]
        inventory = [{ template_id = "kings_vase", name = "King's Vase" }]

        [player]
        id = "p1"
        name = "Aredhel"
        level = 50
        class = 5
        realm = "albion"

        [npc]
        id = "scholar"
        name = "Scholar Alaria"
        role = "scholar"

        [[actions]]
        give = "kings_vase"

        [[actions]]
        whisper = "band of stars"

        [[actions]]
        give = "kings_vase"

        [[actions]]
        give = "kings_vase"
    "#;

    #[tokio::test]
    async fn test_run_band_of_stars() {
        let scenario: Scenario = toml::from_str(RUN).unwrap();
        assert_eq!(scenario.actions[1], ScenarioAction::Whisper("band of stars".into()));

        let mut registry = QuestTypeRegistry::new();
        registry.register_turn_in((*fixtures::definition()).clone());
        let dispatcher = QuestDispatcher::new(Arc::new(registry));
        let catalog = fixtures::catalog();

        let report = scenario.run(&dispatcher, &catalog).await.unwrap();
        let handled: Vec<bool> = report.outcomes.iter().map(|(_, h)| *h).collect();
        assert_eq!(handled, vec![false, true, true, false]);
        assert_eq!(report.grants.len(), 1);
        assert_eq!(report.grants[0].artifact_id, ARTIFACT);
        assert_eq!(report.lines_spoken, 2);
    }

    #[tokio::test]
    async fn test_unknown_accept_fails() {
        let mut scenario: Scenario = toml::from_str(RUN).unwrap();
        scenario.accept = vec!["Nothing".into()];
        let dispatcher = QuestDispatcher::new(Arc::new(QuestTypeRegistry::new()));

        assert!(scenario.run(&dispatcher, &fixtures::catalog()).await.is_err());
    }
}
