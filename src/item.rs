use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Item Templates
// ============================================================================

/// Static item template, as granted by reward catalogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
}

// ============================================================================
// Item Instances
// ============================================================================

/// A concrete item held by a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub template_id: String,
    pub name: String,
}

impl InventoryItem {
    pub fn new(template_id: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id: template_id.to_string(),
            name: name.to_string(),
        }
    }

    pub fn from_template(template: &ItemTemplate) -> Self {
        Self::new(&template.id, &template.name)
    }
}

// ============================================================================
// Inventory
// ============================================================================

pub const INVENTORY_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct Inventory {
    pub slots: Vec<Option<InventoryItem>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            slots: vec![None; INVENTORY_SIZE],
        }
    }

    /// Put an item in the first free slot. Returns the item back if full.
    pub fn add_item(&mut self, item: InventoryItem) -> Result<usize, InventoryItem> {
        match self.slots.iter().position(|s| s.is_none()) {
            Some(index) => {
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    /// Remove a specific item instance. Returns false if it is not held.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|i| i.id == item_id) {
                *slot = None;
                return true;
            }
        }
        false
    }

    pub fn contains(&self, item_id: Uuid) -> bool {
        self.items().any(|i| i.id == item_id)
    }

    pub fn contains_template(&self, template_id: &str) -> bool {
        self.items().any(|i| i.template_id == template_id)
    }

    pub fn find_template(&self, template_id: &str) -> Option<&InventoryItem> {
        self.items().find(|i| i.template_id == template_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
