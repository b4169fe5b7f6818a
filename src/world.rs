//! In-memory collaborators
//!
//! Inventory and NPC implementations backed by plain maps. The driver binary
//! runs scenarios against them, and tests use them to observe side effects.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::actor::{Npc, Player};
use crate::item::{Inventory, InventoryItem, ItemTemplate};
use crate::quest::{ChatChannel, InventoryOps, NpcActions};

/// A reward handed out by an NPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub npc_id: String,
    pub player_id: String,
    pub artifact_id: String,
    pub template: ItemTemplate,
}

#[derive(Debug, Default)]
pub struct InMemoryInventory {
    inventories: HashMap<String, Inventory>,
    pub removals: usize,
    pub grants: Vec<Grant>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item in a player's bags, creating the bags on first use
    pub fn stock(&mut self, player_id: &str, item: InventoryItem) -> bool {
        self.inventories
            .entry(player_id.to_string())
            .or_default()
            .add_item(item)
            .is_ok()
    }

    pub fn inventory(&self, player_id: &str) -> Option<&Inventory> {
        self.inventories.get(player_id)
    }

    pub fn holds(&self, player_id: &str, item: &InventoryItem) -> bool {
        self.inventory(player_id).is_some_and(|inv| inv.contains(item.id))
    }
}

impl InventoryOps for InMemoryInventory {
    fn remove_item(&mut self, player: &Player, item: &InventoryItem) -> bool {
        let removed = self
            .inventories
            .get_mut(&player.id)
            .is_some_and(|inv| inv.remove_item(item.id));
        if removed {
            self.removals += 1;
        }
        removed
    }

    fn give_item(&mut self, npc: &Npc, player: &Player, artifact_id: &str, template: &ItemTemplate) {
        let inventory = self.inventories.entry(player.id.clone()).or_default();
        if let Err(item) = inventory.add_item(InventoryItem::from_template(template)) {
            warn!("{}'s inventory is full, '{}' left with {}", player.name, item.name, npc.name);
        }
        self.grants.push(Grant {
            npc_id: npc.id.clone(),
            player_id: player.id.clone(),
            artifact_id: artifact_id.to_string(),
            template: template.clone(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenLine {
    pub npc_id: String,
    pub player_id: String,
    pub channel: ChatChannel,
    pub text: String,
}

/// Records every turn and line spoken by NPCs
#[derive(Debug, Default)]
pub struct SpeechLog {
    pub lines: Vec<SpokenLine>,
    /// npc id -> player id it last turned to
    pub facing: HashMap<String, String>,
}

impl SpeechLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_line(&self) -> Option<&SpokenLine> {
        self.lines.last()
    }
}

impl NpcActions for SpeechLog {
    fn turn_to(&mut self, npc: &Npc, target: &Player) {
        self.facing.insert(npc.id.clone(), target.id.clone());
    }

    fn say_to(&mut self, npc: &Npc, target: &Player, channel: ChatChannel, text: &str) {
        debug!("{} -> {}: {}", npc.name, target.name, text);
        self.lines.push(SpokenLine {
            npc_id: npc.id.clone(),
            player_id: target.id.clone(),
            channel,
            text: text.to_string(),
        });
    }
}
