//! Quest Hook API
//!
//! The capability interface every quest type implements, and the
//! collaborators a quest may call while handling a hook.

use crate::actor::{Actor, Npc, Player};
use crate::artifact::ArtifactLookup;
use crate::item::{InventoryItem, ItemTemplate};

use super::state::{QuestInstance, QuestStep};

/// Where NPC speech is shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatChannel {
    PopupWindow,
}

/// Inventory mutations owned by the game server
pub trait InventoryOps {
    /// Take `item` away from `player`. False if the player no longer has it.
    fn remove_item(&mut self, player: &Player, item: &InventoryItem) -> bool;

    /// Hand a new item created from `template` to `player`
    fn give_item(&mut self, npc: &Npc, player: &Player, artifact_id: &str, template: &ItemTemplate);
}

/// NPC orientation and speech
pub trait NpcActions {
    fn turn_to(&mut self, npc: &Npc, target: &Player);

    fn say_to(&mut self, npc: &Npc, target: &Player, channel: ChatChannel, text: &str);
}

/// Collaborators available to a quest while it handles one hook
pub struct QuestServices<'a> {
    pub artifacts: &'a dyn ArtifactLookup,
    pub inventory: &'a mut dyn InventoryOps,
    pub npcs: &'a mut dyn NpcActions,
}

impl<'a> QuestServices<'a> {
    pub fn new(
        artifacts: &'a dyn ArtifactLookup,
        inventory: &'a mut dyn InventoryOps,
        npcs: &'a mut dyn NpcActions,
    ) -> Self {
        Self {
            artifacts,
            inventory,
            npcs,
        }
    }
}

/// Eligibility rules the quest framework enforces for every quest type
pub trait EligibilityRules {
    fn base_eligible(&self, player: &Player, artifact_id: &str) -> bool;
}

/// A quest type.
///
/// Implementations are stateless strategies; per-player progress lives in
/// the `QuestInstance` handed to each hook. Hooks may be called for quests
/// and NPCs that have nothing to do with the interaction, so returning
/// `false` must leave the instance and the world untouched.
pub trait Quest: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn artifact_id(&self) -> &str;

    fn description(&self, step: QuestStep) -> &str;

    /// Whether `player` may be offered this quest
    fn check_qualification(&self, player: &Player, rules: &dyn EligibilityRules) -> bool;

    /// `source` handed `item` to `target`. Returns true if handled.
    fn receive_item(
        &self,
        instance: &mut QuestInstance,
        services: &mut QuestServices<'_>,
        source: &Actor,
        target: &Actor,
        item: &InventoryItem,
    ) -> bool;

    /// `source` whispered `text` to `target`. Returns true if handled.
    fn whisper_receive(
        &self,
        instance: &mut QuestInstance,
        services: &mut QuestServices<'_>,
        source: &Actor,
        target: &Actor,
        text: &str,
    ) -> bool;

    /// Mark the quest finished
    fn finish(&self, instance: &mut QuestInstance);
}
