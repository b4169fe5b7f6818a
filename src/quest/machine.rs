//! Turn-in State Machine
//!
//! Pure decisions for a quest that advances on a whispered keyword and
//! completes on the turn-in of a complete artifact book. Nothing here
//! mutates the world; the lifecycle adapter carries out what is decided.

use crate::actor::Player;
use crate::artifact::{ArtifactLookup, RewardKey};
use crate::item::{InventoryItem, ItemTemplate};

use super::events::Rejection;
use super::state::QuestStep;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhisperDecision {
    Advance(QuestStep),
    Reject(Rejection),
}

/// What to do once the item has been taken from the giver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInPlan {
    /// The wildcard reward version
    pub reward: ItemTemplate,
    /// How many versions matched the giver's class and realm
    pub versions_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInDecision {
    Accept(TurnInPlan),
    Reject(Rejection),
}

#[derive(Debug, Clone, Copy)]
pub struct TurnInMachine<'q> {
    artifact_id: &'q str,
    level_required: i32,
}

impl<'q> TurnInMachine<'q> {
    pub fn new(artifact_id: &'q str, level_required: i32) -> Self {
        Self {
            artifact_id,
            level_required,
        }
    }

    pub fn artifact_id(&self) -> &'q str {
        self.artifact_id
    }

    /// Base eligibility plus the level threshold
    pub fn qualify(&self, player: &Player, base_eligible: bool) -> bool {
        base_eligible && player.level >= self.level_required
    }

    /// Only the first step listens, and only for the artifact's name
    pub fn on_whisper(&self, step: QuestStep, text: &str) -> WhisperDecision {
        if step != QuestStep::AwaitingKeyword {
            return WhisperDecision::Reject(Rejection::WrongStep(step));
        }
        if text.to_lowercase() != self.artifact_id.to_lowercase() {
            return WhisperDecision::Reject(Rejection::KeywordMismatch);
        }
        WhisperDecision::Advance(QuestStep::AwaitingBook)
    }

    /// Checks a book turn-in up to, but not including, taking the item.
    ///
    /// The granted reward is always the wildcard version, whatever the
    /// giver's class and realm; the class/realm lookup only decides whether
    /// anything is on offer at all.
    pub fn on_item_received(
        &self,
        step: QuestStep,
        artifacts: &dyn ArtifactLookup,
        giver: &Player,
        item: &InventoryItem,
    ) -> TurnInDecision {
        if step != QuestStep::AwaitingBook {
            return TurnInDecision::Reject(Rejection::WrongStep(step));
        }

        let book = artifacts.page_aggregation(item);
        if !book.pages.is_complete() {
            return TurnInDecision::Reject(Rejection::IncompleteBook(book.pages));
        }
        if book.artifact_id.as_deref() != Some(self.artifact_id) {
            return TurnInDecision::Reject(Rejection::WrongArtifact(book.artifact_id));
        }

        let mut versions = artifacts.reward_entries(self.artifact_id, giver.class, giver.realm);
        if versions.is_empty() {
            return TurnInDecision::Reject(Rejection::NoRewardVersions);
        }

        let versions_found = versions.len();
        match versions.remove(&RewardKey::WILDCARD) {
            Some(reward) => TurnInDecision::Accept(TurnInPlan {
                reward,
                versions_found,
            }),
            None => TurnInDecision::Reject(Rejection::MissingWildcardVersion),
        }
    }
}
