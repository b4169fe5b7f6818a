use std::collections::HashMap;

use crate::actor::{ClassId, Realm};
use crate::item::{InventoryItem, ItemTemplate};

use super::book::PageMask;

/// Which pages an item holds and which artifact book they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAggregation {
    pub pages: PageMask,
    pub artifact_id: Option<String>,
}

impl PageAggregation {
    pub fn not_a_page() -> Self {
        Self {
            pages: PageMask::NO_PAGE,
            artifact_id: None,
        }
    }
}

/// Composite class/realm key of a reward version.
///
/// `None` on either side means "any"; the key with both sides empty is the
/// wildcard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RewardKey {
    pub class: Option<ClassId>,
    pub realm: Option<Realm>,
}

impl RewardKey {
    pub const WILDCARD: RewardKey = RewardKey {
        class: None,
        realm: None,
    };

    pub fn is_wildcard(&self) -> bool {
        *self == Self::WILDCARD
    }

    /// Whether a giver of this class and realm may receive this version
    pub fn admits(&self, class: ClassId, realm: Realm) -> bool {
        self.class.is_none_or(|c| c == class) && self.realm.is_none_or(|r| r == realm)
    }
}

pub type RewardVersions = HashMap<RewardKey, ItemTemplate>;

/// Read-only queries against the artifact database.
pub trait ArtifactLookup: Send + Sync {
    /// Pages held by `item`. Items without page metadata give `NO_PAGE`.
    fn page_aggregation(&self, item: &InventoryItem) -> PageAggregation;

    /// Reward versions of `artifact_id` available to a class/realm.
    /// Never fails; no match yields an empty map.
    fn reward_entries(&self, artifact_id: &str, class: ClassId, realm: Realm) -> RewardVersions;
}
